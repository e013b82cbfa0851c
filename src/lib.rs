pub mod availability;
pub mod backends;
pub mod cli;
pub mod config_loader;
pub mod driver;
pub mod error;
pub mod logging;
pub mod relocate;
pub mod speakers;
pub mod synthesis;
pub mod text;

use rand::rngs::StdRng;
use rand::SeedableRng;

use backends::coqui::CoquiBackend;
use cli::{Args, RunPlan};
use config_loader::Settings;
use driver::{BatchRunner, BatchSummary};
use error::Result;
use speakers::SpeakerPool;
use text::WordList;

/// Runs a whole batch. Every fatal check happens before the first job.
pub fn run(args: &Args, settings: &Settings) -> Result<BatchSummary> {
    let plan = args.plan()?;
    let tool = availability::ensure_tool(&settings.tts_binary)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pool = SpeakerPool::load(&args.input_wav_dir, &settings.audio_extension, &mut rng)?;

    let backend = CoquiBackend::new(tool, settings.synthesis_timeout());
    let mut runner = BatchRunner::new(
        &backend,
        args.synthesis_template(),
        &pool,
        &args.output_wav_dir,
        settings.audio_extension.as_str(),
        rng,
    );

    match plan {
        RunPlan::Generate { text, merge } => runner.run_generate(&text, args.shots, merge),
        RunPlan::Train {
            dict_file,
            word_count,
        } => {
            let words = WordList::load(&dict_file)?;
            runner.run_train(&words, args.shots, word_count)
        }
    }
}
