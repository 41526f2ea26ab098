use std::io::{self, Write};
use std::thread;

use log::info;
use rs_namegen_core::{Generator, MergeStrategy, Options};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log level comes from RUST_LOG (ex. RUST_LOG=debug)
    env_logger::init();

    // Two words from every directory bucket, with a short slug.
    // Each directory (adjectives, nouns, verbs...) becomes one list and
    // words are taken from the lists in order.
    demo(
        "two-word (all dirs) + slug",
        Options::default()
            .include("*/*.txt")
            .with_strategy(MergeStrategy::PerDirectory)
            .with_words(2)
            .with_slug_length(6)
            .with_seed(42),
        5,
        None,
    );

    // Three words with a custom delimiter
    demo(
        "three-word (all dirs), '-' delimiter",
        Options::default()
            .include("*/*.txt")
            .with_strategy(MergeStrategy::PerDirectory)
            .with_words(3)
            .with_delimiter(b'-')
            .with_seed(42),
        5,
        None,
    );

    // Everything flattened into one big list
    demo(
        "single-word (flatten all files)",
        Options::default()
            .with_strategy(MergeStrategy::Flattened)
            .with_words(1)
            .with_seed(42),
        5,
        None,
    );

    // Random word count between 1 and 3, without the filler vocabulary
    demo(
        "1..3 words (exclude ipsum/*)",
        Options::default()
            .include("*/*.txt")
            .exclude("ipsum/*")
            .with_strategy(MergeStrategy::PerDirectory)
            .with_word_range(1, 3)
            .with_seed(123),
        8,
        None,
    );

    // Per-call override: the generator is set for 3 words, calls ask for 1
    demo(
        "override to one word",
        Options::default()
            .include("nouns/*")
            .with_strategy(MergeStrategy::PerDirectory)
            .with_words(3)
            .with_seed(5),
        3,
        Some(1),
    );

    // Attempting a selection that matches nothing
    match Generator::new(Options::default().include("unknown/*")) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("\n✖ 'unknown/*' selects nothing: {e}"),
    }

    let generator = Generator::new(
        Options::default()
            .include("*/*.txt")
            .exclude("ipsum/*")
            .with_strategy(MergeStrategy::PerDirectory)
            .with_words(2)
            .with_seed(7),
    )?;

    // How many distinct names each word count can produce
    println!("\n▶ combinations ({})", generator.list_names().join(", "));
    for words in 1..=generator.lists().len() {
        println!("  {} word(s): {}", words, generator.combinations(words));
    }

    // Reuse one buffer: no allocation once it is large enough
    println!("\n▶ two-word (buffer reuse)");
    let mut buf = Vec::with_capacity(64);
    for _ in 0..6 {
        let name = generator.generate_into(&mut buf, None);
        println!("  - {}", String::from_utf8_lossy(name));
    }

    // Write directly to stdout
    println!("\n▶ write_to(stdout)");
    let mut stdout = io::stdout().lock();
    for _ in 0..3 {
        stdout.write_all(b"  - ")?;
        generator.write_to(&mut stdout, None)?;
        stdout.write_all(b"\n")?;
    }
    drop(stdout);

    // One generator shared by several threads
    let threads = 3;
    let per_thread = 4;
    println!("\n▶ concurrency demo ({threads} threads × {per_thread} names)");
    thread::scope(|scope| {
        for id in 1..=threads {
            let generator = &generator;
            scope.spawn(move || {
                for _ in 0..per_thread {
                    println!("  [w{id}] {}", generator.generate(None));
                }
            });
        }
    });

    info!("done");
    Ok(())
}

/// Builds a generator and prints `samples` names.
fn demo(title: &str, options: Options, samples: usize, words: Option<usize>) {
    let generator = match Generator::new(options) {
        Ok(generator) => generator,
        Err(e) => {
            println!("✖ {title}: {e}");
            return;
        }
    };

    println!("\n▶ {title}");
    for _ in 0..samples {
        println!("  - {}", generator.generate(words));
    }
}
