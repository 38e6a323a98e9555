pub mod aggregate;
pub mod exec;
pub mod output;

pub use aggregate::{generate_report, DailyCommitReport};
pub use exec::exec;
pub use output::{output_json, output_report, render_text};
