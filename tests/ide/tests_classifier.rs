//! Context classification for the text before the cursor.

use rstest::rstest;
use thizer::base::Position;
use thizer::ide::{CompletionMode, classify};

fn at_end(text: &str) -> thizer::ide::CompletionContext {
    classify(text, Position::new(0, text.chars().count()))
}

#[rstest]
#[case("$this->", CompletionMode::SelfMember, "")]
#[case("$this->na", CompletionMode::SelfMember, "na")]
#[case("    return $this->getN", CompletionMode::SelfMember, "getN")]
#[case("$t", CompletionMode::SelfMember, "")]
#[case("$thi", CompletionMode::SelfMember, "")]
#[case("$this-", CompletionMode::SelfMember, "")]
#[case("foo($this->ba", CompletionMode::SelfMember, "ba")]
#[case("$user->na", CompletionMode::InstanceMember, "na")]
#[case("$this->repo->fi", CompletionMode::InstanceMember, "fi")]
#[case("$", CompletionMode::BareVariable, "")]
#[case("$na", CompletionMode::BareVariable, "na")]
#[case("echo 'x'.$co", CompletionMode::BareVariable, "co")]
#[case("sum($a, $b", CompletionMode::BareVariable, "b")]
#[case("$x = new Us", CompletionMode::NewInstance, "Us")]
#[case("throw new \\App\\Ex", CompletionMode::NewInstance, "\\App\\Ex")]
#[case("return NEW Foo", CompletionMode::NewInstance, "Foo")]
#[case("", CompletionMode::Unclassified, "")]
#[case("$x = new ", CompletionMode::Unclassified, "")]
#[case("retu", CompletionMode::Unclassified, "")]
#[case("$x = renew Foo", CompletionMode::Unclassified, "")]
fn test_classification(
    #[case] text: &str,
    #[case] mode: CompletionMode,
    #[case] fragment: &str,
) {
    let context = at_end(text);
    assert_eq!(context.mode, mode, "mode for {text:?}");
    assert_eq!(context.fragment, fragment, "fragment for {text:?}");
}

#[rstest]
#[case("$this->get", 0)]
#[case("  echo $na", 7)]
#[case("f(é, $x", 5)]
fn test_token_start_in_chars(#[case] text: &str, #[case] start: usize) {
    assert_eq!(at_end(text).token_start, start);
}

#[test]
fn test_fragment_is_lower_cased_for_filtering() {
    let context = at_end("$this->GetNa");
    assert_eq!(context.fragment, "GetNa");
    assert_eq!(context.fragment_lower, "getna");
}

#[test]
fn test_cursor_is_recorded() {
    let context = classify("$a", Position::new(7, 2));
    assert_eq!(context.cursor, Position::new(7, 2));
}
