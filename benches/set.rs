//! Benchmarks for `BucketedSet` using Divan.
//!
//! Run with: `cargo bench --bench set`

use divan::{Bencher, black_box};
use windex::BucketedSet;
use windex::payload::{Absolute, Relative};

fn main() {
    divan::main();
}

type Rows<const W: usize> = BucketedSet<i64, Relative<i64, u64>, W>;
type Plain = BucketedSet<u64, Absolute<u64, u64>, 64>;

fn rows<const W: usize>(n: i64) -> Rows<W> {
    let mut set = Rows::<W>::new();
    for row in 0..n {
        let end = set.end();
        set.insert(end, row, Relative::new(0));
    }
    set
}

// =============================================================================
// Append
// =============================================================================

#[divan::bench_group]
mod append {
    use super::{Absolute, Bencher, Plain, black_box};

    #[divan::bench(args = [1_000, 10_000])]
    fn append_plain(bencher: Bencher, n: u64) {
        bencher.bench_local(|| {
            let mut set = Plain::new();
            for i in 0..n {
                let end = set.end();
                set.insert(end, black_box(i), Absolute::new(i));
            }
            set
        });
    }
}

// =============================================================================
// Row Insertion (adjust propagation)
// =============================================================================

#[divan::bench_group]
mod insert_row {
    use super::{Bencher, Relative, Rows, black_box, rows};

    #[divan::bench(consts = [16, 64, 256])]
    fn middle<const W: usize>(bencher: Bencher) {
        bencher
            .with_inputs(|| rows::<W>(10_000))
            .bench_local_values(|mut set| {
                let pos = set.lower_bound(black_box(5_000));
                set.insert(pos, 5_000, Relative::new(1));
                set
            });
    }

    #[divan::bench(consts = [16, 64, 256])]
    fn front<const W: usize>(bencher: Bencher) {
        bencher
            .with_inputs(|| rows::<W>(10_000))
            .bench_local_values(|mut set: Rows<W>| {
                let begin = set.begin();
                set.insert(begin, black_box(0), Relative::new(1));
                set
            });
    }
}

// =============================================================================
// Lookup
// =============================================================================

#[divan::bench_group]
mod lookup {
    use super::{Bencher, black_box, rows};

    #[divan::bench]
    fn upper_bound(bencher: Bencher) {
        let set = rows::<64>(100_000);
        let mut q: i64 = 0;
        bencher.bench_local(|| {
            q = (q + 7_919) % 100_000;
            set.upper_bound(black_box(q))
        });
    }

    #[divan::bench]
    fn iterate(bencher: Bencher) {
        let set = rows::<64>(100_000);
        bencher.bench_local(|| set.iter().map(|(i, _)| i).sum::<i64>());
    }
}
