//! Fluent builder for properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use relgen_core::builder::CodeBuilder;
///
/// let code = CodeBuilder::go()
///     .block_with_close("func main() {", "}", |b| {
///         b.line("fmt.Println(\"ready\")")
///     })
///     .build();
///
/// assert_eq!(code, "func main() {\n\tfmt.Println(\"ready\")\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new builder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a builder with tab indentation (Go output).
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Add a line of code at the current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Add a line comment (`// text`).
    pub fn comment(self, text: &str) -> Self {
        let line = format!("// {}", text);
        self.line(&line)
    }

    /// Increase the indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease the indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line.
    ///
    /// The body runs one indentation level deeper than the header and the
    /// closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::go()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::go().line("var x = 1").build();
        assert_eq!(code, "var x = 1\n");
    }

    #[test]
    fn test_indentation() {
        let code = CodeBuilder::go()
            .line("func main() {")
            .indent()
            .line("return")
            .dedent()
            .line("}")
            .build();

        assert_eq!(code, "func main() {\n\treturn\n}\n");
    }

    #[test]
    fn test_block_with_close() {
        let code = CodeBuilder::go()
            .block_with_close("type Car struct {", "}", |b| b.line("Id uint"))
            .build();

        assert_eq!(code, "type Car struct {\n\tId uint\n}\n");
    }

    #[test]
    fn test_comment_and_blank() {
        let code = CodeBuilder::go()
            .comment("Standard routes")
            .blank()
            .line("return")
            .build();

        assert_eq!(code, "// Standard routes\n\nreturn\n");
    }

    #[test]
    fn test_conditional() {
        let with = CodeBuilder::go()
            .when(true, |b| b.line("a"))
            .line("b")
            .build();
        let without = CodeBuilder::go()
            .when(false, |b| b.line("a"))
            .line("b")
            .build();

        assert_eq!(with, "a\nb\n");
        assert_eq!(without, "b\n");
    }

    #[test]
    fn test_each() {
        let code = CodeBuilder::go()
            .line("import (")
            .indent()
            .each(["\"models\"", "\"router\""], |b, path| b.line(path))
            .dedent()
            .line(")")
            .build();

        assert_eq!(code, "import (\n\t\"models\"\n\t\"router\"\n)\n");
    }

    #[test]
    fn test_nested_blocks() {
        let code = CodeBuilder::new(Indent::Spaces(2))
            .block_with_close("if ok {", "}", |b| {
                b.block_with_close("for i := range xs {", "}", |b| b.line("use(i)"))
            })
            .build();

        assert_eq!(code, "if ok {\n  for i := range xs {\n    use(i)\n  }\n}\n");
    }
}
