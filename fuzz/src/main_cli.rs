use std::io::Read;

use testcase::run;

/// Run the testcase on every file given as argument, or on stdin if there are none.
fn main() {
    let paths: Vec<_> = std::env::args_os().skip(1).collect();

    if paths.is_empty() {
        let mut input = Vec::new();
        std::io::stdin().lock().read_to_end(&mut input).unwrap();
        run(&input);
        return;
    }

    for path in paths {
        eprintln!("running {}", path.to_string_lossy());
        let input = std::fs::read(&path).unwrap();
        run(&input);
    }
}
