//! Lua text helpers shared by every generator.
//!
//! Generated code is handled as lines with relative indentation
//! (four spaces per level). `LuaWriter` keeps track of the current depth
//! so nested fragments can be spliced without re-parsing them.

/// One indentation level in generated code.
pub const INDENT: &str = "    ";

/// Quote a string as a Lua double-quoted literal.
#[must_use]
pub fn lua_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\{:03}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a number as a Lua literal.
///
/// Integral values print without a fractional part so `10.0` becomes `10`.
/// Non-finite values cannot be expressed in Lua source and render as `0`.
#[must_use]
pub fn lua_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Check that a string is a plain Lua identifier (`[A-Za-z_][A-Za-z0-9_]*`).
#[must_use]
pub fn is_lua_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !is_reserved(name)
}

fn is_reserved(name: &str) -> bool {
    matches!(
        name,
        "and" | "break" | "do" | "else" | "elseif" | "end" | "false" | "for" | "function"
            | "if" | "in" | "local" | "nil" | "not" | "or" | "repeat" | "return" | "then"
            | "true" | "until" | "while"
    )
}

/// Net block depth change of one line of Lua.
///
/// Counts `if`, `function` and `do` as openers and `end` as closer,
/// ignoring string literals and `--` comments. `for`/`while` open through
/// their `do`, `elseif`/`else` do not change depth.
#[must_use]
pub fn block_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut word = String::new();
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;

    fn flush(word: &mut String, delta: &mut i32) {
        match word.as_str() {
            "if" | "function" | "do" | "repeat" => *delta += 1,
            "end" | "until" => *delta -= 1,
            _ => {}
        }
        word.clear();
    }

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            if ch == '\\' {
                chars.next();
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => {
                flush(&mut word, &mut delta);
                quote = Some(ch);
            }
            '-' if chars.peek() == Some(&'-') => {
                flush(&mut word, &mut delta);
                return delta;
            }
            c if c.is_ascii_alphanumeric() || c == '_' => word.push(c),
            _ => flush(&mut word, &mut delta),
        }
    }
    flush(&mut word, &mut delta);
    delta
}

/// Check that a sequence of lines opens and closes blocks in balance.
///
/// Depth may never go negative and must return to zero at the end.
#[must_use]
pub fn is_balanced<S: AsRef<str>>(lines: &[S]) -> bool {
    let mut depth = 0;
    for line in lines {
        depth += block_delta(line.as_ref());
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// Line-oriented writer for generated Lua.
#[derive(Clone, Debug, Default)]
pub struct LuaWriter {
    lines: Vec<String>,
    depth: usize,
}

impl LuaWriter {
    /// Create an empty writer at depth zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.depth), text));
        }
        self
    }

    /// Write lines that already carry relative indentation.
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
        self
    }

    /// Write a line and indent everything after it.
    pub fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(header);
        self.depth += 1;
        self
    }

    /// Write `prefix expr suffix` where `expr` may span several lines,
    /// then indent. Continuation lines keep their relative indentation.
    pub fn open_expr(&mut self, prefix: &str, expr: &str, suffix: &str) -> &mut Self {
        let mut parts = expr.lines();
        let first = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();
        if rest.is_empty() {
            self.line(format!("{prefix}{first}{suffix}"));
        } else {
            self.line(format!("{prefix}{first}"));
            let last = rest.len() - 1;
            for (i, part) in rest.iter().enumerate() {
                if i == last {
                    self.line(format!("{part}{suffix}"));
                } else {
                    self.line(part);
                }
            }
        }
        self.depth += 1;
        self
    }

    /// Dedent and write a closing line.
    pub fn close(&mut self, footer: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(footer)
    }

    /// Dedent, write an intermediate line (`else`, `elseif ... then`), indent again.
    pub fn reopen(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.open(text)
    }

    /// Like [`LuaWriter::reopen`], for an `elseif <expr> then` whose
    /// expression may span several lines.
    pub fn reopen_expr(&mut self, prefix: &str, expr: &str, suffix: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.open_expr(prefix, expr, suffix)
    }

    /// Consume the writer and return its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Consume the writer and join its lines.
    #[must_use]
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
