// build_dict: convert TSV word and n-gram lists into the FST + bincode
// artifacts `NgramStore` loads.
//
// Input formats (tab-separated, '#' comments and blank lines skipped):
// - words file:  word<TAB>freq[<TAB>annotation[<TAB>emoji]]
// - ngrams file: context...<TAB>word<TAB>freq
//   (one context column = bigram, two = trigram, earlier word first)
//
// Output: unigram.fst / unigram.bin / ngram.fst / ngram.bin in --out.

use anyhow::{bail, Context, Result};
use clap::Parser;
use libindic_core::dict::{
    ngram_key, DictEntry, NGRAM_BIN, NGRAM_FST, UNIGRAM_BIN, UNIGRAM_FST,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "build_dict", about = "Build dictionary artifacts from TSV lists")]
struct Args {
    /// TSV word list (word, freq, optional annotation, optional emoji flag)
    #[arg(long)]
    words: PathBuf,

    /// TSV n-gram list (one or two context columns, word, freq)
    #[arg(long)]
    ngrams: Option<PathBuf>,

    /// Output directory for the artifacts
    #[arg(long)]
    out: PathBuf,
}

fn parse_words(content: &str) -> Result<BTreeMap<String, DictEntry>> {
    let mut out = BTreeMap::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 2 {
            bail!("words line {}: expected word<TAB>freq", lineno + 1);
        }
        let word = cols[0].trim();
        if word.is_empty() {
            bail!("words line {}: empty word", lineno + 1);
        }
        let freq: u32 = cols[1]
            .trim()
            .parse()
            .with_context(|| format!("words line {}: bad freq {:?}", lineno + 1, cols[1]))?;
        let entry = DictEntry {
            word: word.to_string(),
            annotation: cols.get(2).map(|s| s.trim().to_string()).unwrap_or_default(),
            freq,
            is_emoji: cols
                .get(3)
                .map(|s| matches!(s.trim(), "1" | "true" | "emoji"))
                .unwrap_or(false),
        };
        out.insert(entry.word.clone(), entry);
    }
    if out.is_empty() {
        bail!("empty word list");
    }
    Ok(out)
}

fn parse_ngrams(content: &str) -> Result<BTreeMap<String, Vec<DictEntry>>> {
    let mut out: BTreeMap<String, Vec<DictEntry>> = BTreeMap::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        let key = match cols.len() {
            3 => ngram_key(&[cols[0].trim()]),
            4 => ngram_key(&[cols[0].trim(), cols[1].trim()]),
            n => bail!(
                "ngrams line {}: expected 3 or 4 columns, got {}",
                lineno + 1,
                n
            ),
        };
        let word = cols[cols.len() - 2].trim();
        if word.is_empty() {
            bail!("ngrams line {}: empty word", lineno + 1);
        }
        let freq: u32 = cols[cols.len() - 1].trim().parse().with_context(|| {
            format!("ngrams line {}: bad freq {:?}", lineno + 1, cols[cols.len() - 1])
        })?;
        out.entry(key).or_default().push(DictEntry::new(word, freq));
    }
    Ok(out)
}

fn write_unigram(args: &Args, words: &BTreeMap<String, DictEntry>) -> Result<()> {
    let mut payload: Vec<DictEntry> = Vec::with_capacity(words.len());
    let mut builder = fst::MapBuilder::memory();
    for (word, entry) in words {
        builder
            .insert(word, payload.len() as u64)
            .with_context(|| format!("fst insert {:?}", word))?;
        payload.push(entry.clone());
    }
    fs::write(args.out.join(UNIGRAM_FST), builder.into_inner()?)?;
    fs::write(args.out.join(UNIGRAM_BIN), bincode::serialize(&payload)?)?;
    println!("✓ {} words", payload.len());
    Ok(())
}

fn write_ngrams(args: &Args, ngrams: &BTreeMap<String, Vec<DictEntry>>) -> Result<()> {
    let mut payload: Vec<Vec<DictEntry>> = Vec::with_capacity(ngrams.len());
    let mut builder = fst::MapBuilder::memory();
    for (key, entries) in ngrams {
        builder
            .insert(key, payload.len() as u64)
            .with_context(|| format!("fst insert {:?}", key))?;
        payload.push(entries.clone());
    }
    fs::write(args.out.join(NGRAM_FST), builder.into_inner()?)?;
    fs::write(args.out.join(NGRAM_BIN), bincode::serialize(&payload)?)?;
    println!("✓ {} n-gram contexts", payload.len());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir {:?}", args.out))?;

    let words = fs::read_to_string(&args.words)
        .with_context(|| format!("read words file {:?}", args.words))?;
    let words = parse_words(&words)?;
    write_unigram(&args, &words)?;

    let ngrams = match &args.ngrams {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("read ngrams file {:?}", path))?;
            parse_ngrams(&content)?
        }
        None => BTreeMap::new(),
    };
    write_ngrams(&args, &ngrams)?;

    println!("✓ Artifacts written to {:?}", args.out);
    Ok(())
}
