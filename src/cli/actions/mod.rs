pub mod users;

// Internal "interpreter" for `Action`.
mod run;

#[derive(Debug)]
pub enum Action {
    Find(users::FindArgs),
    Search(users::SearchArgs),
    Create(users::CreateArgs),
    Update(users::UpdateArgs),
    Delete(users::DeleteArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
