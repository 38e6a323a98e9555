pub mod aggregate;
pub mod chart;
pub mod exec;
pub mod output;

pub use aggregate::{aggregate_weeks, WeeklyMergeReport};
pub use chart::{merged_chart, write_chart_file, BarChart};
pub use exec::{exec_list, exec_merge, exec_project_merges, ProjectMergesQuery};
pub use output::{output_json, output_report, render_text};
