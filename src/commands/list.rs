//! List the post feed

use anyhow::Result;

use crate::helpers::format_date;
use crate::listing::PostFeed;
use crate::Copydesk;

/// Fetch the listing and print it, loading further pages on request
pub async fn run(
    app: &Copydesk,
    page_size: Option<usize>,
    pages: usize,
    all: bool,
    json: bool,
) -> Result<()> {
    let mut listing = app.listing();
    if let Some(size) = page_size {
        listing = listing.with_page_size(size);
    }

    let mut feed = PostFeed::from_page(listing.fetch_first_page().await?);
    let mut fetched = 0;
    while feed.has_more() && (all || fetched < pages) {
        listing.load_more(&mut feed).await?;
        fetched += 1;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(feed.posts())?);
        return Ok(());
    }

    println!("Posts ({}):", feed.len());
    for post in feed.posts() {
        let date = match post.publication_date {
            Some(date) => format_date(&date, &app.config.date_format),
            None => "undated".to_string(),
        };
        println!("  {} - {} [{}]", date, post.title, post.uid);
    }
    if feed.has_more() {
        println!("More posts remain; pass --all to fetch the rest.");
    }

    Ok(())
}
