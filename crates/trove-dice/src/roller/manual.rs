use std::io::{BufRead, Write};

use tracing::debug;

use super::{PseudorandomRoller, RollOutcome, RollSource};
use crate::error::{DiceError, DiceResult};
use crate::expr::DiceExpr;

/// Asks an operator for every roll.
///
/// Entering `0` or an empty line rolls with the fallback pseudorandom
/// generator. Input that is not a number in the expression's range is
/// rejected and the prompt repeats. Literal expressions are answered
/// without prompting.
pub struct ManualRoller<R, W> {
    input: R,
    output: W,
    fallback: PseudorandomRoller,
}

impl<R: BufRead, W: Write> ManualRoller<R, W> {
    /// Read answers from `input`, write prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self::with_fallback(input, output, PseudorandomRoller::new())
    }

    /// Use a specific generator for software rolls.
    pub fn with_fallback(input: R, output: W, fallback: PseudorandomRoller) -> Self {
        Self {
            input,
            output,
            fallback,
        }
    }

    /// Give back the input and output streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> RollSource for ManualRoller<R, W> {
    fn roll(&mut self, expr: &DiceExpr, purpose: &str) -> DiceResult<RollOutcome> {
        if let DiceExpr::Constant(value) = expr {
            return Ok(RollOutcome::Rolled(*value));
        }
        loop {
            write!(
                self.output,
                "Roll {expr} for {purpose} (enter 0 to roll via software): "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(DiceError::InputClosed {
                    purpose: purpose.to_string(),
                });
            }
            let answer = line.trim();
            if answer.is_empty() || answer == "0" {
                let value = self.fallback.roll_value(expr);
                debug!(purpose, value, "software roll");
                writeln!(self.output, "{value}")?;
                return Ok(RollOutcome::Rolled(value));
            }
            match answer.parse::<u32>() {
                Ok(value) if expr.contains(value) => return Ok(RollOutcome::Rolled(value)),
                _ => writeln!(
                    self.output,
                    "'{answer}' is not a roll of {expr} ({}-{})",
                    expr.min(),
                    expr.max()
                )?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roller(input: &str) -> ManualRoller<Cursor<Vec<u8>>, Vec<u8>> {
        ManualRoller::with_fallback(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            PseudorandomRoller::seeded(3),
        )
    }

    #[test]
    fn reads_operator_roll() {
        let mut r = roller("42\n");
        assert_eq!(
            r.roll(&DiceExpr::D100, "specific ring").unwrap(),
            RollOutcome::Rolled(42)
        );
        let (_, out) = r.into_parts();
        let prompt = String::from_utf8(out).unwrap();
        assert_eq!(
            prompt,
            "Roll 1d100 for specific ring (enter 0 to roll via software): "
        );
    }

    #[test]
    fn zero_falls_back_to_software() {
        let mut r = roller("0\n");
        let value = r.roll(&DiceExpr::D100, "x").unwrap().value().unwrap();
        assert!((1..=100).contains(&value));
    }

    #[test]
    fn blank_falls_back_to_software() {
        let mut r = roller("\n");
        assert!(r.roll(&DiceExpr::D100, "x").unwrap().value().is_some());
    }

    #[test]
    fn invalid_input_reprompts() {
        let mut r = roller("abc\n101\n7\n");
        assert_eq!(
            r.roll(&DiceExpr::D100, "x").unwrap(),
            RollOutcome::Rolled(7)
        );
        let (_, out) = r.into_parts();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Roll 1d100").count(), 3);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut r = roller("");
        let err = r.roll(&DiceExpr::D100, "degree").unwrap_err();
        assert!(matches!(err, DiceError::InputClosed { .. }));
    }

    #[test]
    fn constants_skip_the_prompt() {
        let mut r = roller("");
        assert_eq!(
            r.roll(&DiceExpr::Constant(9), "x").unwrap(),
            RollOutcome::Rolled(9)
        );
    }
}
