use anyhow::{Result, bail};
use std::fmt;

// Failures coming from the math itself, as opposed to internal faults.
// The session loop downcasts to this to decide how to report an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    DivisionByZero,
    Domain(&'static str),
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DivisionByZero => write!(f, "Division by zero is not allowed"),
            MathError::Domain(msg) => write!(f, "{}", msg),
        }
    }
}
impl std::error::Error for MathError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Factorial,
    Exp,
    Quit,
}

impl Op {
    // Menu order; the number the user types is an index into this.
    pub const ALL: [Op; 14] = [
        Op::Add,
        Op::Subtract,
        Op::Multiply,
        Op::Divide,
        Op::Power,
        Op::Sqrt,
        Op::Sin,
        Op::Cos,
        Op::Tan,
        Op::Log10,
        Op::Ln,
        Op::Factorial,
        Op::Exp,
        Op::Quit,
    ];

    pub fn from_choice(choice: &str) -> Option<Op> {
        match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= Self::ALL.len() => Some(Self::ALL[n - 1]),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Op::Add => "Add",
            Op::Subtract => "Subtract",
            Op::Multiply => "Multiply",
            Op::Divide => "Divide",
            Op::Power => "Power (a^b)",
            Op::Sqrt => "Square root",
            Op::Sin => "sin (radians)",
            Op::Cos => "cos (radians)",
            Op::Tan => "tan (radians)",
            Op::Log10 => "log (base 10)",
            Op::Ln => "ln (natural log)",
            Op::Factorial => "factorial",
            Op::Exp => "e^x (exponential)",
            Op::Quit => "Quit",
        }
    }

    // One prompt per operand; the slice length is the operation's arity.
    pub fn prompts(self) -> &'static [&'static str] {
        match self {
            Op::Add | Op::Subtract | Op::Multiply => {
                &["Enter first number: ", "Enter second number: "]
            }
            Op::Divide => &["Enter numerator: ", "Enter denominator: "],
            Op::Power => &["Enter base: ", "Enter exponent: "],
            Op::Sqrt => &["Enter number: "],
            Op::Sin | Op::Cos | Op::Tan => &["Enter angle in radians: "],
            Op::Log10 | Op::Ln => &["Enter number (>0): "],
            Op::Factorial => &["Enter integer for factorial: "],
            Op::Exp => &["Enter exponent value: "],
            Op::Quit => &[],
        }
    }

    pub fn arity(self) -> usize {
        self.prompts().len()
    }

    // Factorial expects its operand to already be truncated to an integer;
    // the input layer guarantees that.
    pub fn apply(self, args: &[f64]) -> Result<f64> {
        let value = match (self, args) {
            (Op::Add, [a, b]) => a + b,
            (Op::Subtract, [a, b]) => a - b,
            (Op::Multiply, [a, b]) => a * b,
            (Op::Divide, [a, b]) => {
                if *b == 0.0 {
                    return Err(MathError::DivisionByZero.into());
                }
                a / b
            }
            // Invalid real powers (negative base, fractional exponent) yield NaN, which
            // is passed through like any other value.
            (Op::Power, [a, b]) => a.powf(*b),
            (Op::Sqrt, [a]) => {
                if *a < 0.0 {
                    return Err(MathError::Domain("Square root of negative number").into());
                }
                a.sqrt()
            }
            (Op::Sin, [a]) => a.sin(),
            (Op::Cos, [a]) => a.cos(),
            (Op::Tan, [a]) => a.tan(),
            (Op::Log10, [a]) => {
                if *a <= 0.0 {
                    return Err(
                        MathError::Domain("Logarithm domain error; input must be > 0").into()
                    );
                }
                a.log10()
            }
            (Op::Ln, [a]) => {
                if *a <= 0.0 {
                    return Err(MathError::Domain(
                        "Natural logarithm domain error; input must be > 0",
                    )
                    .into());
                }
                a.ln()
            }
            (Op::Factorial, [n]) => factorial(*n as i64)?,
            (Op::Exp, [a]) => a.exp(),
            (Op::Quit, _) => bail!("Quit is not a computable operation"),
            _ => bail!("{} expects {} operands, got {}", self.label(), self.arity(), args.len()),
        };
        Ok(value)
    }
}

fn factorial(n: i64) -> Result<f64, MathError> {
    if n < 0 {
        return Err(MathError::Domain("Factorial of negative number"));
    }
    let mut acc = 1.0;
    for k in 2..=n {
        acc *= k as f64;
        // Past this point every further multiplication stays infinite.
        if acc.is_infinite() {
            break;
        }
    }
    Ok(acc)
}
