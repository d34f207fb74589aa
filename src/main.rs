use std::collections::HashMap;

use grapheq::{parse_str, tokenize};

fn main() {
    let input = "2*(x+1)^2";
    println!("Input: {}", input);

    println!("Tokens:");
    for token in tokenize(input) {
        println!("  {:?}", token);
    }

    match parse_str(input) {
        Ok(expression) => {
            println!("Parsed: {}", expression);
            println!("Variables: {:?}", expression.variables());
            let mut vars = HashMap::new();
            for sample in -3..=3 {
                let x = f64::from(sample);
                vars.insert('x', x);
                match expression.eval(&vars) {
                    Ok(y) => println!("  x = {:>2} -> {}", x, y),
                    Err(e) => eprintln!("  x = {:>2} -> {}", x, e),
                }
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            e.pretty_print(input);
        }
    }

    // A broken input, rendered the way the equation box reports it
    let broken = "2*(3+4";
    println!("\nInput: {}", broken);
    if let Err(e) = parse_str(broken) {
        println!("{}", e);
        e.pretty_print(broken);
    }
}
