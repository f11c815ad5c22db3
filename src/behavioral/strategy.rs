// Strategy: a sorter holds an interchangeable ordering algorithm that can be
// swapped at runtime, as a trait object or as a plain closure. A generic
// sorter fixes the strategy at compile time instead.

use std::io;

use itertools::Itertools;

use crate::transcript::Transcript;

pub trait SortStrategy {
    fn name(&self) -> &'static str;
    fn sort(&self, data: &mut [i32]);
}

/// Ascending, by repeated adjacent swaps.
pub struct BubbleSort;

impl SortStrategy for BubbleSort {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn sort(&self, data: &mut [i32]) {
        for end in (1..data.len()).rev() {
            let mut swapped = false;
            for i in 0..end {
                if data[i] > data[i + 1] {
                    data.swap(i, i + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
    }
}

/// Ascending, Lomuto partition.
pub struct QuickSort;

impl QuickSort {
    fn quick(data: &mut [i32]) {
        if data.len() <= 1 {
            return;
        }
        let pivot = data.len() - 1;
        let mut store = 0;
        for i in 0..pivot {
            if data[i] <= data[pivot] {
                data.swap(i, store);
                store += 1;
            }
        }
        data.swap(store, pivot);
        let (left, right) = data.split_at_mut(store);
        Self::quick(left);
        Self::quick(&mut right[1..]);
    }
}

impl SortStrategy for QuickSort {
    fn name(&self) -> &'static str {
        "quick"
    }

    fn sort(&self, data: &mut [i32]) {
        Self::quick(data);
    }
}

/// Descending: same input, observably different output.
pub struct DescendingSort;

impl SortStrategy for DescendingSort {
    fn name(&self) -> &'static str {
        "descending"
    }

    fn sort(&self, data: &mut [i32]) {
        data.sort_unstable_by(|a, b| b.cmp(a));
    }
}

/// Context.
pub struct Sorter {
    strategy: Box<dyn SortStrategy>,
}

impl Sorter {
    pub fn new(strategy: Box<dyn SortStrategy>) -> Self {
        Self { strategy }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn SortStrategy>) {
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn sort(&self, data: &[i32]) -> Vec<i32> {
        let mut sorted = data.to_vec();
        self.strategy.sort(&mut sorted);
        sorted
    }
}

// ============================================================================
// Example: Strategy chosen at compile time
// ============================================================================

/// Monomorphized per strategy type; no vtable, no swapping.
pub struct StaticSorter<S: SortStrategy> {
    strategy: S,
}

impl<S: SortStrategy> StaticSorter<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn tag(&self) -> String {
        format!("static-{}", self.strategy.name())
    }

    pub fn sort(&self, data: &[i32]) -> Vec<i32> {
        let mut sorted = data.to_vec();
        self.strategy.sort(&mut sorted);
        sorted
    }
}

// ============================================================================
// Example: Strategies as closures
// ============================================================================

pub fn sort_with<F>(data: &[i32], compare: F) -> Vec<i32>
where
    F: Fn(&i32, &i32) -> std::cmp::Ordering,
{
    let mut sorted = data.to_vec();
    sorted.sort_by(compare);
    sorted
}

fn render(data: &[i32]) -> String {
    data.iter().join(" ")
}

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let input = [64, 34, 25, 12, 22, 11, 90];
    out.line("input", render(&input))?;

    let mut sorter = Sorter::new(Box::new(BubbleSort));
    let strategies: [Box<dyn SortStrategy>; 2] = [Box::new(QuickSort), Box::new(DescendingSort)];
    out.line(sorter.strategy(), render(&sorter.sort(&input)))?;
    for strategy in strategies {
        sorter.set_strategy(strategy);
        out.line(sorter.strategy(), render(&sorter.sort(&input)))?;
    }

    let fixed = StaticSorter::new(DescendingSort);
    out.line(&fixed.tag(), render(&fixed.sort(&input)))?;
    out.check("static-matches-dynamic", fixed.sort(&input) == sorter.sort(&input))?;

    // Even numbers first, then by value.
    let evens_first = sort_with(&input, |a, b| (a % 2).cmp(&(b % 2)).then(a.cmp(b)));
    out.line("closure", render(&evens_first))?;
    Ok(())
}
