use crate::cli::actions::{Action, users};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Find(args) => users::find(args).await,
        Action::Search(args) => users::search(args).await,
        Action::Create(args) => users::create(args).await,
        Action::Update(args) => users::update(args).await,
        Action::Delete(args) => users::delete(args).await,
    }
}
