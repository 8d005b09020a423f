use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use kanadrill::data::{KanaTable, PhraseTable};
use kanadrill::engine::selection::{select_kana_set, select_phrase_set};
use kanadrill::engine::{
    KANA_RANDOM_SAMPLE, KanaCriteria, PHRASE_RANDOM_SAMPLE, PhraseCriteria, PracticeOrder,
    PracticeSet,
};

fn bench_kana_selection(c: &mut Criterion) {
    let table = KanaTable::load().unwrap();
    let mut rows = KanaCriteria::default();
    for group in (0..table.row_count()).step_by(2) {
        rows.toggle_row(group);
    }
    let mut chars = KanaCriteria::default();
    for item in table.items().iter().step_by(3) {
        chars.toggle_char(&item.text);
    }

    c.bench_function("select_kana_set (every other row)", |b| {
        b.iter(|| select_kana_set(black_box(table.items()), black_box(&rows)))
    });
    c.bench_function("select_kana_set (every third char)", |b| {
        b.iter(|| select_kana_set(black_box(table.items()), black_box(&chars)))
    });
}

fn bench_phrase_selection(c: &mut Criterion) {
    let table = PhraseTable::load().unwrap();
    let mut criteria = PhraseCriteria::default();
    criteria.cycle_difficulty();

    c.bench_function("select_phrase_set (beginner)", |b| {
        b.iter(|| select_phrase_set(black_box(table.items()), black_box(&criteria)))
    });
}

fn bench_random_sets(c: &mut Criterion) {
    let kana = KanaTable::load().unwrap();
    let phrases = PhraseTable::load().unwrap();
    let kana_items = select_kana_set(kana.items(), &KanaCriteria::default());
    let phrase_items = select_phrase_set(phrases.items(), &PhraseCriteria::default());
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("PracticeSet::build random kana (104 -> 20)", |b| {
        b.iter(|| {
            PracticeSet::build(
                black_box(kana_items.clone()),
                PracticeOrder::Random,
                KANA_RANDOM_SAMPLE,
                &mut rng,
            )
        })
    });
    c.bench_function("PracticeSet::build random phrases (64 -> 10)", |b| {
        b.iter(|| {
            PracticeSet::build(
                black_box(phrase_items.clone()),
                PracticeOrder::Random,
                PHRASE_RANDOM_SAMPLE,
                &mut rng,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_kana_selection,
    bench_phrase_selection,
    bench_random_sets
);
criterion_main!(benches);
