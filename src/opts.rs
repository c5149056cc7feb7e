//! Option scanner
//!
//! A declarative schema for loose single-letter integer flags, scanned in
//! one pass over the argument list.
//!
//! ## Surface
//! - Split form: `-a 2`
//! - Fused form: `-a2`
//! - Unrecognized tokens are silently ignored
//! - A missing flag, a bare trailing flag, or a value that is not an
//!   integer all yield the schema default
//!
//! The split form consumes the following token unconditionally, so
//! `-a -b4` sets `a` to its default (the `-b4` token is spent as `-a`'s
//! value and fails to parse as an integer).

/// Schema entry for one flag
#[derive(Debug, Clone, Copy)]
pub struct OptSpec {
    /// Single-letter flag name (`'a'` scans `-a`)
    pub short: char,

    /// Value used when the flag is absent or its value is not an integer
    pub default: i64,
}

impl OptSpec {
    pub const fn new(short: char, default: i64) -> Self {
        Self { short, default }
    }
}

/// Values produced by a scan, one per schema entry
#[derive(Debug, Clone)]
pub struct Opts {
    values: Vec<(char, i64)>,
}

impl Opts {
    /// Value of the flag named `short`; 0 if it was not in the schema
    pub fn get(&self, short: char) -> i64 {
        self.values
            .iter()
            .find(|(name, _)| *name == short)
            .map(|(_, value)| *value)
            .unwrap_or(0)
    }
}

/// Scan an argument list against a schema
///
/// Later occurrences of a flag overwrite earlier ones. The program name
/// must already be stripped (pass `std::env::args().skip(1)`).
pub fn scan<I>(specs: &[OptSpec], args: I) -> Opts
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut values: Vec<(char, i64)> = specs.iter().map(|s| (s.short, s.default)).collect();

    let mut i = 0;
    while i < args.len() {
        let token = &args[i];
        let mut consumed_value = false;

        for spec in specs {
            let flag = format!("-{}", spec.short);

            if *token == flag && i + 1 < args.len() {
                // Split form: the next token is the value, spent either way
                set(&mut values, spec.short, parse_value(&args[i + 1], spec.default));
                consumed_value = true;
                break;
            }
            if let Some(rest) = token.strip_prefix(flag.as_str()) {
                // Fused form; a bare trailing flag lands here with an
                // empty value and falls back to the default
                set(&mut values, spec.short, parse_value(rest, spec.default));
                break;
            }
        }

        i += if consumed_value { 2 } else { 1 };
    }

    Opts { values }
}

fn parse_value(text: &str, default: i64) -> i64 {
    text.parse().unwrap_or(default)
}

fn set(values: &mut [(char, i64)], short: char, value: i64) {
    if let Some(slot) = values.iter_mut().find(|(name, _)| *name == short) {
        slot.1 = value;
    }
}
