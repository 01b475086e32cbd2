use pegrex::{compile, Error, Nfa, StateSet};

fn nfa(expr: &str) -> Nfa {
    crate::setup();
    compile(expr).unwrap()
}

fn accepts(nfa: &Nfa, input: &str) -> bool {
    nfa.read(input).unwrap()
}

#[test]
fn literal_sequence() {
    let abc = nfa("abc");
    assert!(accepts(&abc, "abc"));
    for input in ["ab", "abcd", "", "acb", "cba"] {
        assert!(!accepts(&abc, input), "'abc' accepted '{}'", input);
    }
}

#[test]
fn alternation() {
    let alt = nfa("a|b");
    assert!(accepts(&alt, "a"));
    assert!(accepts(&alt, "b"));
    assert!(!accepts(&alt, "ab"));
    assert!(!accepts(&alt, ""));
    assert!(!accepts(&alt, "ba"));
}

#[test]
fn star() {
    let star = nfa("a*");
    for n in 0..8 {
        assert!(accepts(&star, &"a".repeat(n)));
    }
    assert_eq!(star.read("aab"), Err(Error::InvalidSymbol('b')));
    assert!(!star.is_match("ba"));
}

#[test]
fn optional() {
    let opt = nfa("a?");
    assert!(accepts(&opt, ""));
    assert!(accepts(&opt, "a"));
    assert!(!accepts(&opt, "aa"));
}

#[test]
fn plus() {
    let plus = nfa("a+");
    assert!(!accepts(&plus, ""));
    for n in 1..8 {
        assert!(accepts(&plus, &"a".repeat(n)));
    }
}

#[test]
fn concatenation_binds_tighter_than_alternation() {
    let re = nfa("ab|cd");
    assert!(accepts(&re, "ab"));
    assert!(accepts(&re, "cd"));
    assert!(!accepts(&re, "abd"));
    assert!(!accepts(&re, "acd"));
    assert!(!accepts(&re, "bc"));
}

#[test]
fn repetitions_inside_sequences() {
    let re = nfa("ab*c+d?");
    for input in ["ac", "abc", "abbbccd", "acd", "acccc"] {
        assert!(accepts(&re, input), "rejected '{}'", input);
    }
    for input in ["a", "ab", "abd", "bc", "acdd", "acdc"] {
        assert!(!accepts(&re, input), "accepted '{}'", input);
    }
}

#[test]
fn stacked_repetitions() {
    let re = nfa("a*?b+*");
    for input in ["", "a", "aaa", "b", "bbb", "aabb"] {
        assert!(accepts(&re, input), "rejected '{}'", input);
    }
    assert!(!accepts(&re, "ba"));
}

#[test]
fn nondeterministic_prefix() {
    // Both branches start with `a`; only the simulation of both at once
    // gets every case right.
    let re = nfa("a*ab|a+c");
    for input in ["ab", "aab", "aaaab", "ac", "aaac"] {
        assert!(accepts(&re, input), "rejected '{}'", input);
    }
    for input in ["b", "c", "a", "aa", "abc", "acb"] {
        assert!(!accepts(&re, input), "accepted '{}'", input);
    }
}

#[test]
fn empty_expression_accepts_only_empty_input() {
    let empty = nfa("");
    assert!(accepts(&empty, ""));
    assert_eq!(empty.read("a"), Err(Error::InvalidSymbol('a')));
}

#[test]
fn read_is_repeatable() {
    let re = nfa("ab+");
    let mut matcher = re.matcher();
    assert!(matcher.read("abb").unwrap());
    assert!(matcher.read("abb").unwrap());
    assert!(!matcher.read("a").unwrap());
    assert!(!matcher.read("a").unwrap());
    assert!(matcher.read("ab").unwrap());
}

#[test]
fn failed_read_does_not_leak_into_the_next() {
    let re = nfa("ab");
    let mut matcher = re.matcher();
    assert_eq!(matcher.read("ax"), Err(Error::InvalidSymbol('x')));
    assert!(matcher.read("ab").unwrap());
}

#[test]
fn matcher_steps_by_hand() {
    let re = nfa("ab");
    let mut matcher = re.matcher();
    let start = re.epsilon_closure(&StateSet::singleton(re.start(), re.len()));
    assert_eq!(matcher.active(), &start);

    matcher.transition('a').unwrap();
    assert!(!matcher.accept());
    matcher.transition('b').unwrap();
    assert!(matcher.accept());

    matcher.reset();
    assert_eq!(matcher.active(), &start);
}

#[test]
fn automaton_is_shared_between_threads() {
    let re = nfa("a*b|c");
    std::thread::scope(|s| {
        let handles: Vec<_> = ["aab", "c", "ab", "ca"]
            .into_iter()
            .map(|input| {
                let re = &re;
                s.spawn(move || re.is_match(input))
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, true, true, false]);
    });
}
