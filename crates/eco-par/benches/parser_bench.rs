use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SAMPLE: &str = r#"
import { add } from './math.eco';

const greet = (name) => {
    let message = "hello, " + name + "!";
    return message;
};

export const people = ["ada", "grace", "margaret"];
let i = 0;
while (i < people.length) {
    greet(people[i]);
    i += add(1, 1);
}

export default greet;
"#;

fn bench_parse_sample(c: &mut Criterion) {
    c.bench_function("parse sample program", |b| {
        b.iter(|| black_box(eco_par::parse(black_box(SAMPLE)).unwrap()))
    });
}

criterion_group!(benches, bench_parse_sample);
criterion_main!(benches);
