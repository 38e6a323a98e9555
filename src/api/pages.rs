use super::Page;
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

/// Request pages from 1 through the last reported page and concatenate their
/// items.
///
/// Every response may push the last page further out, which is how pages
/// that only announce their successor are followed. Any failing page aborts
/// the whole fetch; items gathered so far are dropped with it.
pub fn fetch_all<T, F>(label: &str, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Result<Page<T>>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Fetching {label}..."));

    let first = match fetch_page(1) {
        Ok(page) => page,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    let mut total_pages = first.total_pages;
    let mut items = first.items;
    let mut page = 1;

    while page < total_pages {
        page += 1;
        pb.set_message(format!("Fetching {label} (page {page}/{total_pages})..."));
        match fetch_page(page) {
            Ok(next) => {
                total_pages = total_pages.max(next.total_pages);
                items.extend(next.items);
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Fetched {} {label} over {total_pages} page(s)", items.len());
    Ok(items)
}
