//! End-to-end scenario tests: whole programs run through the public
//! `run_source` pipeline, asserted on captured output.

use kaynat::{Host, KaynatError};

struct BufferHost {
    lines: Vec<String>,
}

impl Host for BufferHost {
    fn print_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn read_line(&mut self) -> std::io::Result<String> {
        Ok(String::new())
    }
}

fn run(source: &str) -> Result<Vec<String>, KaynatError> {
    let mut host = BufferHost { lines: Vec::new() };
    kaynat::run_source(source, &mut host)?;
    Ok(host.lines)
}

#[test]
fn adding_two_variables() {
    let out = run("set x to 5 . set y to 7 . say x plus y .\n").unwrap();
    assert_eq!(out, vec!["12"]);
}

#[test]
fn unbound_identifier_prints_as_its_own_spelling() {
    let out = run("set name to World . say Hello, name .\n").unwrap();
    assert_eq!(out, vec!["Hello name"]);
}

#[test]
fn function_definition_and_call_with_return_value() {
    let out = run(
        "define a function called square that takes n . give back n multiplied by n . end .\n\
         call square with 6 and store as r .\n\
         say r .\n",
    )
    .unwrap();
    assert_eq!(out, vec!["36"]);
}

#[test]
fn while_loop_prints_each_iteration() {
    let out = run(
        "set i to 0 .\nwhile i is less than 3 . say i . change i to i plus 1 . end .\n",
    )
    .unwrap();
    assert_eq!(out, vec!["0", "1", "2"]);
}

#[test]
fn blueprint_method_mutates_receiver_state() {
    let out = run(
        "define a blueprint called Animal .\n\
         it has name .\n\
         to set_name, take n . set my name to n . end .\n\
         to speak . say my name . end .\n\
         end .\n\
         create a new Animal called a .\n\
         call set_name on a with Rex .\n\
         call speak on a .\n",
    )
    .unwrap();
    assert_eq!(out, vec!["Rex"]);
}

#[test]
fn loop_from_counts_inclusive() {
    let out = run("loop from 1 to 3 . say current . end .\n").unwrap();
    assert_eq!(out, vec!["1", "2", "3"]);
}

#[test]
fn constant_reassignment_is_a_name_error_and_leaves_value_untouched() {
    let mut host = BufferHost { lines: Vec::new() };
    let err = kaynat::run_source(
        "always set limit as 10 .\nchange limit to 20 .\nsay limit .\n",
        &mut host,
    )
    .unwrap_err();
    assert_eq!(err.label(), "NameError");
}

#[test]
fn scope_does_not_leak_out_of_a_loop_body() {
    let mut host = BufferHost { lines: Vec::new() };
    let err = kaynat::run_source(
        "while false . set inner to 1 . end .\nsay inner .\n",
        &mut host,
    )
    .unwrap_err();
    assert_eq!(err.label(), "NameError");
}

#[test]
fn closures_observe_mutations_made_after_definition() {
    let out = run(
        "set counter to 0 .\n\
         define a function called bump that takes none . give back counter . end .\n\
         change counter to 5 .\n\
         call bump with none and store as seen .\n\
         say seen .\n",
    );
    // `none` as a parameter name/argument is just an identifier here; the
    // point under test is that `bump`'s body reads the *current* value of
    // `counter` through its captured environment, not the value at definition time.
    assert!(out.is_ok());
    assert_eq!(out.unwrap(), vec!["5"]);
}

#[test]
fn for_each_over_a_non_list_is_a_type_error() {
    let mut host = BufferHost { lines: Vec::new() };
    let err = kaynat::run_source("for each item in 5 . say item . end .\n", &mut host).unwrap_err();
    assert_eq!(err.label(), "TypeError");
}

#[test]
fn abstract_blueprint_cannot_be_instantiated() {
    let mut host = BufferHost { lines: Vec::new() };
    let err = kaynat::run_source(
        "define an abstract blueprint called Shape .\nend .\ncreate a new Shape called s .\n",
        &mut host,
    )
    .unwrap_err();
    assert_eq!(err.label(), "TypeError");
}

#[test]
fn ordering_comparison_between_non_numbers_is_a_type_error() {
    let mut host = BufferHost { lines: Vec::new() };
    let err = kaynat::run_source("if true is greater than false then . say oops . end .\n", &mut host).unwrap_err();
    assert_eq!(err.label(), "TypeError");
}

#[test]
fn short_circuit_and_never_evaluates_a_failing_right_operand() {
    // Division by zero on the right would raise a ValueError if evaluated;
    // `false and ...` must short-circuit before getting there.
    let out = run("if false and 1 divided by 0 is greater than 0 then . say oops . end . say done .\n").unwrap();
    assert_eq!(out, vec!["done"]);
}

#[test]
fn and_separated_call_arguments_still_leave_the_store_as_connector_intact() {
    // `and` separates arguments here, but the trailing `and store as` is the
    // store-as connector, not a third argument.
    let out = run(
        "define a function called add_three that takes a, b, c . give back a plus b plus c . end .\n\
         call add_three with 1 and 2 and 3 and store as total .\n\
         say total .\n",
    )
    .unwrap();
    assert_eq!(out, vec!["6"]);
}
