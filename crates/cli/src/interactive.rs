//! Interactive prompt: read user ids one per line and print recommendations.
//!
//! The dataset is loaded once by the caller and reused for every query.

use crate::input::parse_user_id;
use anyhow::Result;
use colored::Colorize;
use data_loader::{Dataset, UserId};
use recommender::Recommender;
use std::io::{BufRead, Write};

/// User ids known to have ratings in the Book-Crossing dataset
pub const SUGGESTED_USER_IDS: [UserId; 4] = [500, 300, 900, 777];

/// Run the prompt loop until `quit`, `exit` or end of input
pub fn run<R: BufRead, W: Write>(
    dataset: &Dataset,
    recommender: &Recommender,
    count: usize,
    mut input: R,
    mut output: W,
) -> Result<()> {
    print_banner(&mut output)?;

    let mut line = String::new();
    loop {
        write!(output, "{} ", "Enter User ID:".bold())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let entry = line.trim();
        match entry {
            "" => continue,
            "quit" | "exit" => break,
            _ => {}
        }

        let user_id = match parse_user_id(entry) {
            Ok(user_id) => user_id,
            Err(e) => {
                writeln!(output, "{}", e.to_string().red())?;
                continue;
            }
        };

        let titles = recommender.recommend(user_id, &dataset.ratings, &dataset.books, count);
        print_titles(&mut output, user_id, &titles)?;
    }

    Ok(())
}

fn print_banner<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "{}", "Book Recommendation System".bold().blue())?;
    let suggestions = SUGGESTED_USER_IDS
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(output, "Note: Try these User IDs for recommendations: {}", suggestions)?;
    writeln!(output, "Type 'quit' to exit.")?;
    Ok(())
}

/// Numbered title list, or the "no recommendations" message for an empty list
pub fn print_titles<W: Write>(output: &mut W, user_id: UserId, titles: &[String]) -> Result<()> {
    writeln!(
        output,
        "{}",
        format!("Top Book Recommendations for User {}:", user_id).bold().blue()
    )?;
    if titles.is_empty() {
        writeln!(output, "No recommendations found for this user.")?;
    } else {
        for (i, title) in titles.iter().enumerate() {
            writeln!(output, "{}: {}", (i + 1).to_string().green(), title)?;
        }
    }
    Ok(())
}
