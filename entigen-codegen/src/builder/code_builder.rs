//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use entigen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::csharp();
/// builder
///     .push_line("public class Order")
///     .push_line("{")
///     .push_indent()
///     .push_line("public int Id { get; set; }")
///     .push_dedent()
///     .push_line("}");
/// let code = builder.build();
///
/// assert!(code.contains("    public int Id { get; set; }\n"));
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation (C# default).
    pub fn csharp() -> Self {
        Self::new(Indent::CSHARP)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Open a brace block: the line, then `{`, then indent.
    pub fn push_block(&mut self, s: &str) -> &mut Self {
        self.push_line(s).push_line("{").push_indent()
    }

    /// Close a brace block: dedent, then `}` with an optional trailer.
    pub fn push_close(&mut self, trailer: &str) -> &mut Self {
        self.push_dedent();
        self.write_indent();
        self.buffer.push('}');
        self.buffer.push_str(trailer);
        self.buffer.push('\n');
        self
    }

    /// Build the final code string.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}
