use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use finnish_wiktionary::{
    conjugate_present, divide_syllables, parse_article, Article, FetchError, Lookup, LookupError,
    ParseError, Wiktionary,
};

#[derive(Parser)]
#[command(name = "finnish-wiktionary")]
#[command(about = "Look up Finnish words: Wiktionary translations, present-tense conjugation, syllables")]
struct Args {
    /// Word to look up; omit to start the interactive prompt
    word: Option<String>,

    /// Language section to extract from the article
    #[arg(short, long, default_value = "Finnish")]
    language: String,

    /// Conjugate the word in the present tense instead of fetching its article
    #[arg(short, long)]
    conjugate: bool,

    /// Print the word's syllable division
    #[arg(short, long)]
    syllables: bool,

    /// Parse a locally saved article HTML file instead of fetching
    #[arg(long)]
    file: Option<PathBuf>,

    /// Emit JSON instead of the human-readable layout
    #[arg(long)]
    json: bool,

    /// Fall back to the search page for suggestions when no article exists
    #[arg(long)]
    suggest: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    if args.conjugate || args.syllables {
        let word = args
            .word
            .as_deref()
            .context("a word is required with --conjugate/--syllables")?;
        if args.syllables {
            println!("{}", divide_syllables(word).join("-"));
        }
        if args.conjugate {
            match conjugate_present(word) {
                Ok(forms) if args.json => println!("{}", serde_json::to_string_pretty(&forms)?),
                Ok(forms) => println!("{forms}"),
                Err(err) => println!("{err}"),
            }
        }
        return Ok(());
    }

    if let Some(path) = &args.file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let word = args
            .word
            .as_deref()
            .context("a word is required together with --file")?;
        let article = parse_article(&raw, word, &args.language)?;
        print_result(&article, args.json)?;
        return Ok(());
    }

    let wiki = Wiktionary::new(args.language.clone());
    match &args.word {
        Some(word) => lookup_and_print(&wiki, word, &args),
        None => interactive(wiki, &args),
    }
}

fn lookup_and_print(wiki: &Wiktionary, word: &str, args: &Args) -> Result<()> {
    match wiki.lookup(word, !args.suggest) {
        Ok(Lookup::Article(article)) => print_result(&article, args.json)?,
        Ok(Lookup::Suggestions(suggestions)) => {
            println!(
                "{word} does not have its own article, however it does exist in the articles for the following words:"
            );
            for suggestion in suggestions {
                println!("  {suggestion}");
            }
        }
        Err(LookupError::Fetch(FetchError::NotFound(_))) => {
            println!("\"{word}\" does not seem to have a page on Wiktionary");
        }
        Err(LookupError::Parse(ParseError::LanguageNotFound(language))) => {
            println!(
                "\"{word}\" does not seem to exist as a word in the {language}-English dictionary"
            );
        }
        Err(err) => println!("lookup failed: {err}"),
    }
    Ok(())
}

fn print_result(article: &Article, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(article)?);
        return Ok(());
    }
    println!("Search term: {}", article.word);
    for section in &article.languages {
        for block in &section.pos_blocks {
            println!("\n   {}", block.tag);
            for translation in &block.translations {
                println!("\n      - {}", translation.text);
                for example in &translation.examples {
                    println!("        * {}", example.text);
                    if let Some(back) = &example.back_translation {
                        println!("          {back}");
                    }
                }
            }
        }
    }
    Ok(())
}

fn greet(language: &str) {
    println!("*********************************************");
    println!("Welcome to a simple tool to access the online user generated dictionary Wiktionary.");
    println!("You are currently accessing the {language}-English dictionary.");
    println!("To look up a word and its meaning in English just write it and press Enter.");
    println!("To change the language used write \"*language\" and press Enter.");
    println!("To exit this program write \"*exit\" and press Enter.");
    println!("To show this message again write \"*help\" and press Enter.");
    println!("*********************************************");
}

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn interactive(mut wiki: Wiktionary, args: &Args) -> Result<()> {
    greet(wiki.language());
    loop {
        let Some(command) = prompt(">> ")? else { break };
        match command.as_str() {
            "*exit" => break,
            "*help" => greet(wiki.language()),
            "*language" => {
                let Some(new_language) = prompt("Which language would you like to use?: >> ")?
                else {
                    break;
                };
                if new_language.is_empty() {
                    println!("The language was left unchanged ({})", wiki.language());
                } else {
                    let old_language = wiki.language().to_string();
                    wiki = Wiktionary::new(new_language);
                    println!(
                        "The language was changed from {} to {}",
                        old_language,
                        wiki.language()
                    );
                }
            }
            "" => {}
            word => lookup_and_print(&wiki, word, args)?,
        }
        println!();
    }
    Ok(())
}
