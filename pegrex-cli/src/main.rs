use pegrex::{Error, Nfa};

/// Strings every compiled expression is run against.
const DEMO_INPUTS: &[&str] = &["", "a", "b", "ab", "abc", "aa", "aab", "abab"];

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 1 {
        eprintln!("Usage: pegrex <regex>");
        std::process::exit(2);
    }

    if let Err(err) = run(&args[0]) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(expr: &str) -> anyhow::Result<()> {
    println!("=== Pattern: '{}' ===", expr);

    let postfix = pegrex::convert(expr)?;
    println!("Postfix: {}", postfix);

    let nfa = pegrex::build(&postfix)?;
    log::info!("compiled '{}' into {} states", expr, nfa.len());
    print_nfa(&nfa);

    println!("Runs:");
    for input in DEMO_INPUTS {
        let verdict = match nfa.read(input) {
            Ok(true) => "accept".to_string(),
            Ok(false) => "reject".to_string(),
            Err(Error::InvalidSymbol(sym)) => {
                format!("reject (symbol '{}' not in alphabet)", sym)
            }
            Err(err) => return Err(err.into()),
        };
        println!("  {:<8} {}", format!("{:?}", input), verdict);
    }
    Ok(())
}

fn print_nfa(nfa: &Nfa) {
    println!("Start state: {}", nfa.start());
    println!("Accepting states: {:?}", nfa.accepting());
    println!("Alphabet: {:?}", nfa.alphabet());
    println!("States:");

    for (id, state) in nfa.states().iter().enumerate() {
        print!("  {}:", id);
        if nfa.accepting().contains(id) {
            print!(" MATCH");
        }
        if !state.epsilon.is_empty() {
            print!(" ε -> {:?}", state.epsilon);
        }
        for (symbol, targets) in &state.symbols {
            print!(" '{}' -> {:?}", symbol, targets);
        }
        println!();
    }
}
