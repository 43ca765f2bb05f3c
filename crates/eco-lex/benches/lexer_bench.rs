use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eco_lex::Lexer;

const SAMPLE: &str = r#"
const greet = (name) => {
    let message = "hello, " + name + "!";
    return message;
};

let people = ["ada", "grace", "margaret"];
let i = 0;
while (i < people.length) {
    greet(people[i]);
    i += 1;
}
"#;

fn bench_lex_sample(c: &mut Criterion) {
    c.bench_function("lex sample program", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(SAMPLE));
            let mut count = 0;
            while lexer.peek().unwrap().is_some() {
                lexer.consume().unwrap();
                count += 1;
            }
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_lex_sample);
criterion_main!(benches);
