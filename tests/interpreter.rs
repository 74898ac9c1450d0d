use pretty_assertions::assert_eq;

use hearth::{Error, SharedBuffer, Vm};

fn run_capturing(source: &str) -> (Result<(), Error>, String) {
    let buffer = SharedBuffer::new();
    let mut vm = Vm::with_output(buffer.clone());
    let result = vm.interpret(source);
    (result, buffer.contents())
}

fn expect_stdout(source: &str, expected: &str) {
    let (result, stdout) = run_capturing(source);
    result.expect("expected the program to run to completion");
    assert_eq!(stdout.trim_end_matches('\n'), expected);
}

#[test]
fn scenario_arithmetic_precedence() {
    expect_stdout("print 1 + 2 * 3;", "7");
}

#[test]
fn scenario_string_concatenation() {
    expect_stdout(r#"var a = "st"; var b = "ring"; print a + b;"#, "string");
}

#[test]
fn scenario_while_loop_prints_each_iteration() {
    expect_stdout("var i = 0; while (i < 3) { print i; i = i + 1; }", "0\n1\n2");
}

#[test]
fn scenario_for_loop_prints_each_iteration() {
    expect_stdout("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2");
}

#[test]
fn scenario_if_else_takes_the_false_branch() {
    expect_stdout(r#"if (false) print "x"; else print "y";"#, "y");
}

#[test]
fn scenario_nil_is_not_equal_to_false() {
    expect_stdout("print nil == false;", "false");
}

#[test]
fn scenario_function_call_returns_sum() {
    expect_stdout("func add(a, b) { return a + b; } print add(2, 3);", "5");
}

#[test]
fn scenario_recursive_fibonacci() {
    let source = r#"
        func fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(10);
    "#;
    expect_stdout(source, "55");
}

#[test]
fn error_scenario_undefined_global_reference() {
    let (result, stdout) = run_capturing("print a;");
    let err = result.unwrap_err();
    match err {
        Error::Runtime(e) => assert_eq!(e.message, "Undefined variable 'a'."),
        other => panic!("expected a runtime error, got {other:?}"),
    }
    assert_eq!(stdout, "");
}

#[test]
fn error_scenario_number_plus_string_is_a_type_error() {
    let (result, _) = run_capturing(r#"1 + "a";"#);
    let err = result.unwrap_err();
    match err {
        Error::Runtime(e) => assert_eq!(e.message, "Operands must be numbers or strings"),
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn error_scenario_redeclared_local_in_the_same_scope() {
    let (result, _) = run_capturing("{ var x; var x; }");
    let err = result.unwrap_err();
    match err {
        Error::Compile(e) => assert!(e.0.iter().any(|c| c.message.contains("Already a variable"))),
        other => panic!("expected a compile error, got {other:?}"),
    }
}

#[test]
fn error_scenario_calling_with_too_many_arguments() {
    let (result, _) = run_capturing("func f(a) { return a; } f(1, 2);");
    let err = result.unwrap_err();
    match err {
        Error::Runtime(e) => assert_eq!(e.message, "Expected 1 arguments but got 2."),
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn error_scenario_return_from_top_level_code() {
    let (result, _) = run_capturing("return 1;");
    let err = result.unwrap_err();
    match err {
        Error::Compile(e) => assert!(e.0.iter().any(|c| c.message == "Can't return from top-level code.")),
        other => panic!("expected a compile error, got {other:?}"),
    }
}

#[test]
fn assigning_to_an_undeclared_global_is_a_runtime_error() {
    let (result, _) = run_capturing("x = 5;");
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Runtime(_)));
}

#[test]
fn globals_persist_across_multiple_interpret_calls_on_the_same_vm() {
    let buffer = SharedBuffer::new();
    let mut vm = Vm::with_output(buffer.clone());
    vm.interpret("var counter = 0;").unwrap();
    vm.interpret("counter = counter + 1;").unwrap();
    vm.interpret("print counter;").unwrap();
    assert_eq!(buffer.contents(), "1\n");
}

#[test]
fn a_runtime_error_resets_the_vm_so_the_next_call_starts_clean() {
    let buffer = SharedBuffer::new();
    let mut vm = Vm::with_output(buffer.clone());

    let err = vm.interpret("print a;").unwrap_err();
    assert!(matches!(err, Error::Runtime(_)));

    // If the stack/frames from the failed call weren't reset, this second,
    // unrelated program would run to completion successfully but also
    // silently replay the abandoned tail of the first program's bytecode.
    vm.interpret("print 1;").unwrap();
    assert_eq!(buffer.contents(), "1\n");
}

#[test]
fn block_scoped_locals_shadow_outer_scope() {
    let source = r#"
        var x = "outer";
        {
            var x = "inner";
            print x;
        }
        print x;
    "#;
    expect_stdout(source, "inner\nouter");
}

#[test]
fn and_or_short_circuit_without_evaluating_the_right_operand() {
    let source = r#"
        print false and (1 / 0 == 0);
        print true or (1 / 0 == 0);
    "#;
    expect_stdout(source, "false\ntrue");
}
