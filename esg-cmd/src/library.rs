//! ESG library document upload subcommands.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use esg_api::client::{ClientConfig, EsgClient};
use esg_api::library_book::{LibraryBook, LibraryBookDraft};
use log::info;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, PartialEq)]
pub struct BookArgs {
    /// Document title
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: Option<String>,

    /// Library category, e.g. "report" or "policy"
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// File to attach; the upload is sent as multipart when given
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum LibraryBookAction {
    /// Create a new library document
    Create {
        #[command(flatten)]
        book: BookArgs,
    },

    /// Update an existing library document
    Update {
        /// Document id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        book: BookArgs,
    },
}

impl BookArgs {
    /// Validated draft: the title must not be blank and an attached file must exist.
    pub fn into_draft(self) -> Result<LibraryBookDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            bail!("A document title is required");
        }
        if let Some(path) = &self.file {
            if !path.is_file() {
                bail!("Attachment {} does not exist", path.display());
            }
        }
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Ok(LibraryBookDraft {
            title,
            author: non_blank(self.author),
            category: non_blank(self.category),
            description: non_blank(self.description),
            file: self.file,
        })
    }
}

fn print_book(book: &LibraryBook) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(book)?);
    Ok(())
}

pub async fn run_library_book(config: &ClientConfig, action: LibraryBookAction) -> Result<()> {
    let client = EsgClient::new(config.clone())?;
    let book = match action {
        LibraryBookAction::Create { book } => {
            let draft = book.into_draft()?;
            info!("Creating library document {:?}", draft.title);
            client
                .create_library_book(&draft)
                .await
                .context("Failed to create library document")?
        }
        LibraryBookAction::Update { id, book } => {
            let draft = book.into_draft()?;
            info!("Updating library document {}", id);
            client
                .update_library_book(&id, &draft)
                .await
                .with_context(|| format!("Failed to update library document {}", id))?
        }
    };
    print_book(&book)
}
