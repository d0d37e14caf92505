use std::fmt;

/// One step of a line edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp<'a> {
    Keep(&'a str),
    Remove(&'a str),
    Add(&'a str),
}

impl<'a> DiffOp<'a> {
    #[must_use]
    pub fn line(&self) -> &'a str {
        match self {
            Self::Keep(line) | Self::Remove(line) | Self::Add(line) => line,
        }
    }

    /// Unified-diff marker for this op.
    #[must_use]
    pub fn prefix(&self) -> char {
        match self {
            Self::Keep(_) => ' ',
            Self::Remove(_) => '-',
            Self::Add(_) => '+',
        }
    }
}

impl fmt::Display for DiffOp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.line())
    }
}

/// Dense `(m + 1) x (n + 1)` table of longest-common-subsequence lengths.
struct LcsTable {
    width: usize,
    cells: Vec<usize>,
}

impl LcsTable {
    fn build<S: AsRef<str>>(before: &[S], after: &[S]) -> Self {
        let width = after.len() + 1;
        let mut cells = vec![0; (before.len() + 1) * width];

        for i in 1..=before.len() {
            for j in 1..=after.len() {
                cells[i * width + j] = if before[i - 1].as_ref() == after[j - 1].as_ref() {
                    cells[(i - 1) * width + (j - 1)] + 1
                } else {
                    cells[(i - 1) * width + j].max(cells[i * width + (j - 1)])
                };
            }
        }

        Self { width, cells }
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }
}

/// Computes an exact minimal edit script turning `before` into `after`.
///
/// Every line of `before` shows up once as `Keep` or `Remove`, every line of `after` once
/// as `Keep` or `Add`. When several minimal scripts exist, backtracking prefers `Add`
/// on ties, which places removals ahead of additions within a changed hunk.
pub fn diff_lines<'a, S: AsRef<str>>(before: &'a [S], after: &'a [S]) -> Vec<DiffOp<'a>> {
    let table = LcsTable::build(before, after);
    let mut ops = Vec::with_capacity(before.len() + after.len());
    let (mut i, mut j) = (before.len(), after.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && before[i - 1].as_ref() == after[j - 1].as_ref() {
            ops.push(DiffOp::Keep(before[i - 1].as_ref()));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table.get(i, j - 1) >= table.get(i - 1, j)) {
            ops.push(DiffOp::Add(after[j - 1].as_ref()));
            j -= 1;
        } else {
            ops.push(DiffOp::Remove(before[i - 1].as_ref()));
            i -= 1;
        }
    }

    ops.reverse();
    ops
}

/// Line diff of two texts rendered with ` `, `-` and `+` prefixes.
///
/// Both inputs are split on `\n`, so an empty text counts as one empty line.
pub fn unified_diff(before: &str, after: &str) -> String {
    let before_lines: Vec<&str> = before.split('\n').collect();
    let after_lines: Vec<&str> = after.split('\n').collect();

    diff_lines(&before_lines, &after_lines)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
