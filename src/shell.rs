use std::io::{BufRead, Write};

use rand::RngCore;
use tracing::debug;

use crate::{
    error::Result,
    remark::{
        matcher::{RemarkMatcher, RemarkSource},
        Sentiment,
    },
};

pub const CONTEXT_PROMPT: &str =
    "\nEnter a context (e.g., 'new shoes', 'messy desk', 'sunny day', or 'quit' to exit): ";
pub const SENTIMENT_PROMPT: &str = "Do you want a 'positive' or 'negative' remark? ";
pub const SENTIMENT_HINT: &str = "Please enter 'positive' or 'negative'.";
pub const FAREWELL: &str = "\nThanks for using the Remark Generator!";
/// typed at the context prompt, any case
pub const EXIT_KEYWORD: &str = "quit";

/// Blocking read-eval-print loop over any input and output.
/// Keeps no state between rounds.
pub struct Shell<'a, S, R, W>
where
    S: RemarkSource,
    R: BufRead,
    W: Write,
{
    source: &'a S,
    input: R,
    output: W,
    rng: Box<dyn RngCore + 'a>,
    show_matches: bool,
}

impl<'a, S, R, W> Shell<'a, S, R, W>
where
    S: RemarkSource,
    R: BufRead,
    W: Write,
{
    pub fn new(source: &'a S, input: R, output: W) -> Self {
        Self {
            source,
            input,
            output,
            rng: Box::new(rand::thread_rng()),
            show_matches: source.show_matches(),
        }
    }

    pub fn with_rng(mut self, rng: impl RngCore + 'a) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Override the source's choice of printing the matched contexts
    pub fn with_show_matches(mut self, show: bool) -> Self {
        self.show_matches = show;
        self
    }

    /// Give back the output, mostly for inspecting what was printed
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed, lowercased line. `None` on EOF.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Run until the exit keyword or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(context) = self.prompt(CONTEXT_PROMPT)? else {
                debug!("input closed");
                break;
            };
            if context == EXIT_KEYWORD {
                break;
            }

            let Some(answer) = self.prompt(SENTIMENT_PROMPT)? else {
                debug!("input closed");
                break;
            };
            let sentiment: Sentiment = match answer.parse() {
                Ok(s) => s,
                Err(e) => {
                    debug!(error = %e, "rejected sentiment");
                    writeln!(self.output, "{}", SENTIMENT_HINT)?;
                    continue;
                }
            };

            let generation = self.source.generate(&context, sentiment, &mut *self.rng);
            if self.show_matches && !generation.matches.is_empty() {
                writeln!(
                    self.output,
                    "\nDEBUG: Input '{}' matched to: {}",
                    context, generation.matches
                )?;
            }
            writeln!(self.output, "\nGenerated Remark: {}", generation.outcome)?;
        }
        writeln!(self.output, "{}", FAREWELL)?;
        self.output.flush()?;
        Ok(())
    }
}

/// rows shown in the startup preview
pub const PREVIEW_ROWS: usize = 5;

/// Write the table preview and the fitted shape, the banner shown before any remark
pub fn write_startup<W: Write>(output: &mut W, matcher: &RemarkMatcher) -> Result<()> {
    let table = matcher.table();
    writeln!(
        output,
        "Data loaded into remark table successfully. First {} rows:",
        PREVIEW_ROWS.min(table.len())
    )?;
    writeln!(output, "{:>4}  {:<16} {:<9} remark", "", "context", "sentiment")?;
    for (idx, entry) in table.entries().iter().take(PREVIEW_ROWS).enumerate() {
        writeln!(
            output,
            "{:>4}  {:<16} {:<9} {}",
            idx, entry.context, entry.sentiment, entry.remark
        )?;
    }
    let (rows, vocab) = matcher.shape();
    writeln!(
        output,
        "\nTF-IDF vectorizer fitted and contexts transformed into numerical vectors."
    )?;
    writeln!(output, "Shape of training vectors: ({}, {})", rows, vocab)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Cursor};

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        config::GeneratorConfig,
        remark::{
            matcher::{Generation, MatchSet, RemarkOutcome},
            RemarkTable,
        },
    };

    /// records every call, always answers the same
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(String, Sentiment)>>,
    }

    impl RemarkSource for Recorder {
        fn generate(
            &self,
            context: &str,
            sentiment: Sentiment,
            _rng: &mut dyn RngCore,
        ) -> Generation {
            self.calls.borrow_mut().push((context.to_string(), sentiment));
            Generation {
                matches: MatchSet::default(),
                outcome: RemarkOutcome::Remark("canned".into()),
            }
        }
    }

    fn run_with<S: RemarkSource>(source: &S, input: &str) -> String {
        let mut shell = Shell::new(source, Cursor::new(input.to_string()), Vec::new())
            .with_rng(StdRng::seed_from_u64(0));
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn quit_ends_without_more_prompts() {
        let source = Recorder::default();
        let out = run_with(&source, "QuIt\nrusty car\npositive\n");
        assert!(source.calls.borrow().is_empty());
        assert_eq!(out.matches(CONTEXT_PROMPT).count(), 1);
        assert!(!out.contains(SENTIMENT_PROMPT));
        assert!(out.ends_with("\nThanks for using the Remark Generator!\n"));
    }

    #[test]
    fn invalid_sentiment_is_rejected_before_generation() {
        let source = Recorder::default();
        let out = run_with(&source, "rusty car\nneutral\nquit\n");
        assert!(source.calls.borrow().is_empty());
        assert!(out.contains(SENTIMENT_HINT));
        // back to the context prompt for the next round
        assert_eq!(out.matches(CONTEXT_PROMPT).count(), 2);
    }

    #[test]
    fn input_is_trimmed_and_lowercased() {
        let source = Recorder::default();
        run_with(&source, "  Rusty CAR \n POSITIVE\nquit\n");
        assert_eq!(
            *source.calls.borrow(),
            vec![("rusty car".to_string(), Sentiment::Positive)]
        );
    }

    #[test]
    fn eof_ends_the_loop() {
        let source = Recorder::default();
        let out = run_with(&source, "rusty car\n");
        assert!(source.calls.borrow().is_empty());
        assert!(out.contains(FAREWELL));
        let out = run_with(&source, "");
        assert!(out.contains(FAREWELL));
    }

    #[test]
    fn prints_matches_and_remark() {
        let matcher = RemarkMatcher::builtin().unwrap();
        let out = run_with(&matcher, "rusty car\npositive\nslow computer\nnegative\nquit\n");
        assert!(out.contains("\nDEBUG: Input 'rusty car' matched to: 'rusty car' (Sim: 1.00)\n"));
        assert!(out.contains("\nGenerated Remark: It has character!\n"));
        assert!(out.contains("\nGenerated Remark: Is it running on a hamster wheel?\n"));
    }

    #[test]
    fn no_match_skips_debug_line() {
        let matcher = RemarkMatcher::builtin().unwrap();
        let out = run_with(&matcher, "zzyzx qwop\nnegative\nquit\n");
        assert!(!out.contains("DEBUG:"));
        assert!(out.contains(
            "\nGenerated Remark: Input context is too unique. Couldn't find a good match for 'zzyzx qwop'.\n"
        ));
    }

    #[test]
    fn debug_line_can_be_disabled() {
        let matcher = RemarkMatcher::builtin().unwrap();
        let mut shell = Shell::new(&matcher, Cursor::new("burnt toast\npositive\n"), Vec::new())
            .with_show_matches(false);
        shell.run().unwrap();
        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(!out.contains("DEBUG:"));
        assert!(out.contains("Generated Remark: Extra crunchy!"));
    }

    #[test]
    fn matcher_config_drives_the_shell() {
        let config = GeneratorConfig::default()
            .with_similarity_threshold(0.99)
            .with_top_n(1)
            .with_show_matches(false);
        let matcher = RemarkMatcher::with_config(RemarkTable::builtin().unwrap(), config).unwrap();
        let out = run_with(&matcher, "slow loading\nnegative\nslow computer\nnegative\nquit\n");
        // only exact contexts clear 0.99
        assert!(out.contains(
            "\nGenerated Remark: Input context is too unique. Couldn't find a good match for 'slow loading'.\n"
        ));
        assert!(out.contains("\nGenerated Remark: Is it running on a hamster wheel?\n"));
        // show_matches comes from the matcher's config
        assert!(!out.contains("DEBUG:"));
    }

    #[test]
    fn startup_shows_preview_and_shape() {
        let matcher = RemarkMatcher::builtin().unwrap();
        let mut out = Vec::new();
        write_startup(&mut out, &matcher).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Data loaded into remark table successfully. First 5 rows:");
        assert!(lines[2].starts_with("   0  rusty car"));
        assert!(lines[2].ends_with("It has character!"));
        assert!(lines[6].starts_with("   4  new haircut"));
        assert!(!out.contains("rainy day"));
        assert!(out.ends_with("Shape of training vectors: (22, 22)\n"));
    }
}
