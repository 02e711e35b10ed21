//! Show one assembled post

use anyhow::Result;

use crate::content::richtext;
use crate::helpers::format_date;
use crate::readtime;
use crate::Copydesk;

/// Assemble the post behind `slug` and print it
pub async fn run(app: &Copydesk, slug: &str, json: bool) -> Result<()> {
    let view = app.assembler().assemble(slug).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let post = &view.post;
    println!("{}", post.title);
    if let Some(date) = post.publication_date {
        println!("Published: {}", format_date(&date, &app.config.date_format));
    }
    if !post.author.is_empty() {
        println!("Author: {}", post.author);
    }
    println!(
        "Reading time: {} min ({} words)",
        view.reading_minutes,
        readtime::word_count(&post.content)
    );
    if let Some(url) = &post.banner_url {
        println!("Banner: {}", url);
    }

    for block in &post.content {
        println!();
        if !block.heading.is_empty() {
            println!("## {}", block.heading);
        }
        let text = richtext::as_text(&block.body);
        if !text.trim().is_empty() {
            println!("{}", text);
        }
    }

    if view.previous_post.is_some() || view.next_post.is_some() {
        println!();
    }
    if let Some(prev) = &view.previous_post {
        println!("Previous: {} [{}]", prev.title, prev.uid);
    }
    if let Some(next) = &view.next_post {
        println!("Next: {} [{}]", next.title, next.uid);
    }

    Ok(())
}
