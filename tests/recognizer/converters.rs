//! Converters applied to recognized outputs

use fuzzyintent_grammar::SlotStore;
use fuzzyintent_recognizer::{RecognizerConfig, value_text};
use serde_json::{Value, json};

use crate::recognizer;

fn square(values: &[Value], _: &[String]) -> Result<Vec<Value>, String> {
    values
        .iter()
        .map(|v| v.as_i64().map(|n| json!(n * n)).ok_or_else(|| format!("{v} is not an integer")))
        .collect()
}

fn pow(values: &[Value], args: &[String]) -> Result<Vec<Value>, String> {
    let exponent = match args.first() {
        Some(arg) => arg.parse::<u32>().map_err(|e| e.to_string())?,
        None => 1,
    };
    values
        .iter()
        .map(|v| v.as_i64().map(|n| json!(n.pow(exponent))).ok_or_else(|| format!("{v} is not an integer")))
        .collect()
}

fn floatify(values: &[Value], _: &[String]) -> Result<Vec<Value>, String> {
    let text: Vec<String> = values.iter().map(value_text).collect();
    let number: f64 = text.join(".").parse().map_err(|e| format!("{e}"))?;
    Ok(vec![json!(number)])
}

#[test]
fn word_converters_chain() {
    let recognizer = recognizer(
        "[Test]\nthis is a test!upper ten:10!int!square\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    )
    .with_converter("square", square);
    let recognition = recognizer.recognize("this is a test ten").into_recognition().unwrap();
    assert_eq!(recognition.text, "this is a TEST 100");
    assert_eq!(
        recognition.tokens,
        vec![json!("this"), json!("is"), json!("a"), json!("TEST"), json!(100)]
    );
}

#[test]
fn converter_arguments() {
    let recognizer = recognizer(
        "[Test]\nthis is a test ten:10!int!pow,3\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    )
    .with_converter("pow", pow);
    let recognition = recognizer.recognize("this is a test ten").into_recognition().unwrap();
    assert_eq!(recognition.tokens.last(), Some(&json!(1000)));
}

#[test]
fn converted_word_inside_slot() {
    let recognizer = recognizer(
        "[Test]\nthis is a test (ten:10!int){number}\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    );
    let recognition = recognizer.recognize("this is a test ten").into_recognition().unwrap();
    let slot = recognition.slot("number").unwrap();
    assert_eq!(slot.value, "ten");
    assert_eq!(slot.canonical_value, json!(10));
}

#[test]
fn tag_converter() {
    let recognizer = recognizer(
        "[Test]\nthis is a test (four: point: two:4.2){number!float}\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    );
    let recognition = recognizer.recognize("this is a test four point two").into_recognition().unwrap();
    let slot = recognition.slot("number").unwrap();
    assert_eq!(slot.value, "four point two");
    assert_eq!(slot.canonical_value, json!(4.2));
    assert_eq!(recognition.text, "this is a test 4.2");
}

#[test]
fn custom_tag_converter_sees_every_value() {
    let recognizer = recognizer(
        "[Test]\nthis is a test (four:4 point: two:2){number!floatify}\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    )
    .with_converter("floatify", floatify);
    let recognition = recognizer.recognize("this is a test four point two").into_recognition().unwrap();
    assert_eq!(recognition.slot("number").unwrap().canonical_value, json!(4.2));
}

#[test]
fn group_converter() {
    let recognizer = recognizer("[Test]\nthis (is a test)!upper\n", &SlotStore::new(), RecognizerConfig::default());
    let recognition = recognizer.recognize("this is a test").into_recognition().unwrap();
    assert_eq!(recognition.text, "this IS A TEST");
}

#[test]
fn number_range_converts_to_integer() {
    let recognizer = recognizer(
        "[SetBrightness]\nset brightness to (0..100,10){level}\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    );
    let recognition = recognizer.recognize("set brightness to 70").into_recognition().unwrap();
    assert_eq!(recognition.slot("level").unwrap().canonical_value, json!(70));
}

#[test]
fn unknown_converter_keeps_text() {
    let recognizer = recognizer("[Test]\nsay (hello)!shout\n", &SlotStore::new(), RecognizerConfig::default());
    let recognition = recognizer.recognize("say hello").into_recognition().unwrap();
    assert_eq!(recognition.text, "say hello");
}
