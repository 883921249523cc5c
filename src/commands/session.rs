//! `examforge session` - session management

use crate::cli::{Cli, SessionCommands};
use crate::commands::helpers::print_json;
use crate::output_by_format_result;
use examforge_core::error::Result;
use examforge_core::model::{SpecializationId, UserId};
use examforge_core::store::Store;

pub fn execute(cli: &Cli, store: &Store, command: &SessionCommands) -> Result<()> {
    match command {
        SessionCommands::Create {
            user,
            specialization,
            max_score,
        } => {
            let id = store.db().create_session(
                UserId(*user),
                SpecializationId(*specialization),
                *max_score,
            )?;

            output_by_format_result!(cli.format,
                json => {
                    print_json(&serde_json::json!({
                        "session": id,
                        "user": user,
                        "specialization": specialization,
                        "generation_state": "not_started"
                    }))
                },
                human => {
                    println!("{}", id);
                }
            )
        }
    }
}
