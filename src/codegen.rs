use crate::token::tokenize;
use crate::token::Token;
use crate::token::Token::*;

/// Default size of the tape allocated by the generated program, in bytes.
pub const TAPE_SIZE: i32 = 30000;

fn prologue(tape_size: i32) -> String {
    format!(
        concat!(
            "#include <stdio.h>\n",
            "#include <stdlib.h>\n",
            "\n\n",
            "int main(int argc, char** argv) {{\n",
            "unsigned char* ptr = calloc({}, 1);\n"
        ),
        tape_size
    )
}

/// Translation state for one Solfege source file. `output` only ever
/// grows, seeded with the C prologue; the flags make a handful of tokens
/// context-sensitive (see `emit`). One instance per file, fed strictly
/// left to right.
pub struct Codegen {
    output: String,
    is_statement: bool,
    is_print: bool,
    is_put: bool,
    print_data: String,
    put_data: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self::with_tape_size(TAPE_SIZE)
    }

    pub fn with_tape_size(tape_size: i32) -> Self {
        Codegen {
            output: prologue(tape_size),
            is_statement: false,
            is_print: false,
            is_put: false,
            print_data: String::new(),
            put_data: String::new(),
        }
    }

    /// Splits one source line into whitespace-delimited words and feeds
    /// each through `emit` with its literal spelling.
    pub fn feed_line(&mut self, line: &str) {
        for word in line.split_whitespace() {
            self.emit(tokenize(word), word);
        }
    }

    /// Appends one token's C fragment to the output. `literal` is the raw
    /// word the token came from; only the `Undefined` rule looks at it.
    /// Unbalanced openers and closers are emitted as-is, no checking.
    pub fn emit(&mut self, token: Token, literal: &str) {
        match token {
            Do => self.output.push_str("++ptr;\n"),
            DoSharp => {
                if self.is_statement {
                    self.output.push_str("*ptr ");
                }
            }
            Di => self.output.push_str(";\n"),
            Re => self.output.push_str("--ptr;\n"),
            ReSharp => self.output.push_str("}\n"),
            // `ti` is not declared anywhere in the emitted program
            Ri => self.output.push_str("*ti = 0;\n"),
            Mi => self.output.push_str("++*ptr;\n"),
            MiSharp => self.output.push_str("{\n\n"),
            Fa => self.output.push_str("--*ptr;\n"),
            FaSharp => self.output.push_str("("),
            Fi => {
                self.output.push_str("printf(\"%s\", \"");
                self.is_print = true;
            }
            Sol => self.output.push_str("putchar(*ptr);\n"),
            SolSharp => self.output.push_str(")"),
            Si => {
                self.output.push_str(&self.print_data);
                self.output.push_str("\");\n");
                self.is_print = false;
                self.print_data.clear();
            }
            SiSharp => self.is_put = true,
            La => self.output.push_str("*ptr = getchar();\n"),
            LaSharp => {
                self.output.push_str(&self.put_data);
                self.put_data.clear();
            }
            Li => {
                if self.is_statement {
                    self.output.push_str("}\n");
                    self.is_statement = false;
                } else {
                    self.is_statement = true;
                    self.output.push_str("if");
                }
            }
            Ti => self.output.push_str("break;\n"),
            Te => {
                if self.is_statement {
                    self.output.push_str("=");
                }
            }
            Le => {
                if self.is_statement {
                    self.output.push_str(">");
                }
            }
            Se => {
                if self.is_statement {
                    self.output.push_str("<");
                }
            }
            Me => {
                if self.is_statement {
                    self.output.push_str("!");
                }
            }
            Ra => {
                self.is_statement = true;
                self.output.push_str("while");
            }
            Undefined => {
                if self.is_print {
                    self.print_data.push_str(literal);
                    self.print_data.push(' ');
                }
            }
        }
    }

    /// True between the token opening a conditional/loop header and the
    /// `Li` that closes it.
    pub fn in_statement(&self) -> bool {
        self.is_statement
    }

    /// True once `Si#` has been seen. No emission rule reads it back; the
    /// matching `put_data` buffer is only ever drained by `La#`.
    pub fn put_pending(&self) -> bool {
        self.is_put
    }

    /// Closes the `main` body and yields the finished translation unit.
    pub fn finish(mut self) -> String {
        self.output.push('}');
        self.output
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

/// Translates a whole Solfege source text, line by line, to a complete C
/// translation unit.
pub fn translate(source: &str, tape_size: i32) -> String {
    let mut gen = Codegen::with_tape_size(tape_size);
    for line in source.lines() {
        gen.feed_line(line);
    }
    gen.finish()
}
