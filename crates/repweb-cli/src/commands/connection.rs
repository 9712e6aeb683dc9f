// crates/repweb-cli/src/commands/connection.rs
//
// `repweb connection <from> <to>` — show a shortest chain of trust.

use serde::Serialize;

use repweb_core::RepwebError;

use crate::output::{format_json, OutputFormat};
use crate::shared::SharedReputation;

/// A chain of trust between two players, if one exists.
#[derive(Debug, Serialize)]
pub struct ConnectionReport {
    pub from: String,
    pub to: String,
    /// Players after `from`, ending with `to`. Empty when `from == to`,
    /// `None` when no chain exists.
    pub path: Option<Vec<String>>,
}

/// Find a shortest chain of trust from `from` to `to`.
pub async fn execute(state: &SharedReputation, from: &str, to: &str) -> Result<ConnectionReport, RepwebError> {
    let start = state.resolve(from).await?;
    let end = state.resolve(to).await?;

    let path = if start.id == end.id {
        Some(Vec::new())
    } else {
        state.graph.lock().await.get_reference(&start.id, &end.id)
    };

    let path = match path {
        Some(ids) => Some(state.display_names(&ids).await?),
        None => None,
    };

    Ok(ConnectionReport {
        from: start.name,
        to: end.name,
        path,
    })
}

/// Render a report as a single line of text.
pub fn describe(report: &ConnectionReport) -> String {
    match &report.path {
        Some(path) => {
            let mut chain = vec![report.from.as_str()];
            chain.extend(path.iter().map(String::as_str));
            format!(
                "Chain of trust between {} and {}:\n{}",
                report.from,
                report.to,
                chain.join(" -> ")
            )
        }
        None => format!(
            "There is no path of trust between player {} and player {}.",
            report.from, report.to
        ),
    }
}

/// Run the connection command.
pub async fn run(
    state: &SharedReputation,
    from: &str,
    to: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = execute(state, from, to).await?;
    match format {
        OutputFormat::Table => println!("{}", describe(&report)),
        OutputFormat::Json => println!("{}", format_json(&report)),
    }
    Ok(())
}
