use cminus::codegen::Op;
use cminus::compiler::Compiler;

fn count(compiler: &Compiler, op: Op) -> usize {
    compiler
        .instructions()
        .iter()
        .filter(|instruction| instruction.op == op)
        .count()
}

#[test]
fn conditional_produces_compare_and_patched_jumps() {
    let compiler = Compiler::compile("int main(void){ if (1<2) x=1; else x=2; }");

    assert_eq!(count(&compiler, Op::Lt), 1);
    assert_eq!(count(&compiler, Op::Jpf), 1);
    // the two branch assignments, plus the prologue word count
    assert_eq!(count(&compiler, Op::Assign), 3);
    // the program entry jump, the over-else jump and the epilogue
    assert_eq!(count(&compiler, Op::Jp), 3);
}

#[test]
fn entry_jump_targets_main() {
    let compiler = Compiler::compile("void main(void){ }");

    assert_eq!(compiler.instructions()[0].to_string(), "(JP, 1, , )");
}

#[test]
fn output_prints_its_argument() {
    let compiler = Compiler::compile("void main(void){ output(3); }");

    assert_eq!(count(&compiler, Op::Print), 1);
    assert_eq!(
        compiler.semantic_errors_report(),
        "The input program is semantically correct."
    );
}

#[test]
fn repeat_until_emits_a_back_jump() {
    let compiler = Compiler::compile("void main(void){ int i; repeat i = i + 1; until (10 < i) }");

    let listing = compiler.intermediate_code_report();
    // the loop guard jumps back to the first body instruction
    assert!(listing.contains("(JPF, 504, 2, )"), "{listing}");
}

#[test]
fn undeclared_identifier_taints_the_stream() {
    let compiler = Compiler::compile("void main(void){ x = 1; }");

    assert_eq!(
        compiler.semantic_errors_report(),
        "#1 : semantic error, 'x' is not defined"
    );
    // emission continues regardless
    assert!(count(&compiler, Op::Assign) >= 1);
}

#[test]
fn break_outside_a_loop_is_a_semantic_error() {
    let compiler = Compiler::compile("void main(void){ break; }");

    assert_eq!(
        compiler.semantic_errors_report(),
        "#1 : semantic error, no enclosing loop found for 'break'"
    );
}

#[test]
fn listing_is_indexed_from_zero() {
    let compiler = Compiler::compile("void main(void){ }");

    let listing = compiler.intermediate_code_report();
    for (index, line) in listing.lines().enumerate() {
        assert!(line.starts_with(&format!("{index}\t")), "{line}");
    }
}
