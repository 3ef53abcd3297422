use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_ngram_core::io::read_corpus;
use rs_ngram_core::{GenerationConfig, NGramModel};

/// Generates random sentences from an n-gram model of the given text files.
#[derive(Parser, Debug)]
#[command(name = "rs-ngram")]
#[command(version)]
struct Cli {
	/// N-gram order (number of tokens per window, >= 2)
	n: usize,

	/// Number of sentences to generate (>= 1)
	m: usize,

	/// Text files used as corpus, concatenated in order
	#[arg(required = true)]
	files: Vec<PathBuf>,

	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,

	/// Attempts allowed per requested sentence
	#[arg(long)]
	attempts: Option<usize>,

	/// Sampling steps allowed per attempt
	#[arg(long)]
	max_steps: Option<usize>,
}

impl Cli {
	/// Builds the generation limits from the command line.
	fn generation_config(&self) -> rs_ngram_core::Result<GenerationConfig> {
		NGramModel::validate_order(self.n)?;
		let mut config = GenerationConfig::new(self.m)?;
		if let Some(attempts) = self.attempts {
			config.set_attempts_per_sentence(attempts)?;
		}
		if let Some(steps) = self.max_steps {
			config.set_max_steps(steps)?;
		}
		Ok(config)
	}

	fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}

fn main() -> anyhow::Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	// Validate before touching the files
	let config = cli.generation_config()?;

	println!("This program generates random sentences based on a {}-gram model.", cli.n);
	println!();

	let text = read_corpus(&cli.files)?;
	let model = NGramModel::from_text(&text, cli.n)?;
	log::info!(
		"Learned {} sentence(s), {} context(s) from {} file(s)",
		model.sentence_count(),
		model.table().len(),
		cli.files.len()
	);

	let sentences = model.generate(&config, &mut cli.rng());
	println!("Here are your generated sentences:");
	for sentence in sentences {
		println!("{sentence}");
	}

	Ok(())
}
