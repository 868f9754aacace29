use std::fs;

use solfc::{check, to_solfege, tokenize, translate, Codegen, Token, TAPE_SIZE, VOCABULARY};

const PROLOGUE: &str = concat!(
    "#include <stdio.h>\n",
    "#include <stdlib.h>\n",
    "\n\n",
    "int main(int argc, char** argv) {\n",
    "unsigned char* ptr = calloc(30000, 1);\n"
);

fn body(source: &str) -> String {
    let full = translate(source, TAPE_SIZE);
    assert!(full.starts_with(PROLOGUE), "prologue missing:\n{}", full);
    assert!(full.ends_with('}'));
    full[PROLOGUE.len()..full.len() - 1].to_string()
}

#[test]
fn vocabulary_round_trips_through_the_tokenizer() {
    assert_eq!(VOCABULARY.len(), Token::COUNT);
    for &(literal, token) in VOCABULARY.iter() {
        assert_eq!(tokenize(literal), token);
    }
    assert_eq!(tokenize("Ut"), Token::Undefined);
}

#[test]
fn hello_program_prints_its_text() {
    assert_eq!(
        body("Fi Hello , world! Si"),
        "printf(\"%s\", \"Hello , world! \");\n"
    );
}

#[test]
fn loop_opener_from_reverse_mode_translates_to_a_while_header() {
    let tokens = to_solfege("[");
    assert_eq!(tokens, "Ra Fa# Do# Sol# Mi# ");
    assert_eq!(body(&tokens), "while(*ptr ){\n\n");
}

#[test]
fn clear_loop_round_trip() {
    let tokens = to_solfege("[-]");
    assert_eq!(body(&tokens), "while(*ptr ){\n\n--*ptr;\n}\n");
}

#[test]
fn cat_program_round_trip() {
    // ,[.,] reads bytes and echoes them until EOF-as-zero
    let tokens = to_solfege(",[.,]");
    assert_eq!(
        body(&tokens),
        concat!(
            "*ptr = getchar();\n",
            "while(*ptr ){\n\n",
            "putchar(*ptr);\n",
            "*ptr = getchar();\n",
            "}\n"
        )
    );
}

#[test]
fn reverse_output_is_valid_forward_input() {
    let tokens = to_solfege("+++[->+<].");

    // Every emitted word must be a defined token
    for word in tokens.split_whitespace() {
        assert_ne!(tokenize(word), Token::Undefined, "word {:?}", word);
    }
}

#[test]
fn statement_flag_is_clear_after_closed_loop_body() {
    let mut gen = Codegen::new();
    for line in "Ra Fa# Do# Sol# Mi#\nTi\nRe# Li".lines() {
        gen.feed_line(line);
    }
    assert!(!gen.in_statement());
}

#[test]
fn file_driven_translation() {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("greet.sol");
    fs::write(&src_path, "Fi Hi Si\nSol\n").unwrap();

    let source = fs::read_to_string(&src_path).unwrap();
    let c_path = dir.path().join("greet.c");
    fs::write(&c_path, translate(&source, TAPE_SIZE)).unwrap();

    let generated = fs::read_to_string(&c_path).unwrap();
    assert!(generated.starts_with("#include <stdio.h>\n"));
    assert!(generated.contains("printf(\"%s\", \"Hi \");\n"));
    assert!(generated.contains("putchar(*ptr);\n"));
    assert!(generated.ends_with('}'));
}

#[test]
fn check_does_not_change_emission() {
    let source = "Ra Fa# Do# Sol# Mi# Sol Re# Li";
    let before = translate(source, TAPE_SIZE);
    check(source).unwrap();
    assert_eq!(translate(source, TAPE_SIZE), before);
}
