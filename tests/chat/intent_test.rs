//! Tests for sequence-request classification.

use springseq::chat::is_sequence_request;

#[test]
fn greetings_are_conversational() {
    assert!(!is_sequence_request("hello, how are you?"));
    assert!(!is_sequence_request("Thanks, that helps"));
    assert!(!is_sequence_request("???"));
}

#[test]
fn explicit_requests_are_detected() {
    assert!(is_sequence_request(
        "Generate a test sequence for a compression spring with free length 50mm"
    ));
    assert!(is_sequence_request("create sequence please"));
    assert!(is_sequence_request("I need a tension test"));
}

#[test]
fn test_word_with_direction_hint_is_a_request() {
    assert!(is_sequence_request("please test it by pushing down"));
}

#[test]
fn explicit_phrasing_beats_greeting() {
    assert!(is_sequence_request("Hi! Make a sequence for part 123"));
}

#[test]
fn two_parameters_make_an_implicit_request() {
    assert!(is_sequence_request("free length 58, wire diameter 3"));
    assert!(!is_sequence_request("free length 58"));
}

#[test]
fn explanation_questions_are_not_requests() {
    assert!(!is_sequence_request(
        "What is spring rate when free length 58 and wire diameter 3?"
    ));
}
