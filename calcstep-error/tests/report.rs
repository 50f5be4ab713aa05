use ariadne::Fmt;
use calcstep_attrs::ErrorKind;
use calcstep_error::{Error, EXPR};

/// A function was called that the engine does not know about.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function", ""],
    help = format!("try {}", "sin(x)".fg(EXPR)),
)]
pub struct UnknownFunc {
    pub name: String,
}

/// No fields at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "something went wrong", labels = ["here"])]
pub struct Bare;

fn render(err: &Error, input: &str) -> String {
    let report = err.report_to_string("input", input).unwrap();
    String::from_utf8(strip_ansi_escapes::strip(report)).unwrap()
}

#[test]
fn report_contains_message_and_labels() {
    let input = "foo(x) + 1";
    let err = Error::new(vec![0..3, 3..6], UnknownFunc { name: "foo".to_string() });
    let text = render(&err, input);

    assert!(text.contains("unknown function `foo`"), "{}", text);
    assert!(text.contains("this function"), "{}", text);
    assert!(text.contains("try sin(x)"), "{}", text);
    assert!(text.contains("foo(x) + 1"), "{}", text);
}

#[test]
fn unit_struct_report() {
    let err = Error::new(vec![2..3], Bare);
    let text = render(&err, "x ^ 2");

    assert!(text.contains("something went wrong"), "{}", text);
    assert!(text.contains("here"), "{}", text);
}

#[test]
fn fatal_flag() {
    assert!(!Error::new(vec![0..1], Bare).fatal);
    assert!(Error::new_fatal(vec![0..1], Bare).fatal);
}

#[test]
fn downcast_to_concrete_kind() {
    let err = Error::new(vec![0..3], UnknownFunc { name: "foo".to_string() });

    assert_eq!(
        err.downcast_ref::<UnknownFunc>(),
        Some(&UnknownFunc { name: "foo".to_string() }),
    );
    assert!(err.downcast_ref::<Bare>().is_none());
}
