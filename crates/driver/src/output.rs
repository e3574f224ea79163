use std::collections::BTreeSet;

/// Numbering used when printing triangle indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBase {
    #[default]
    Zero,
    One,
}

impl IndexBase {
    pub fn apply(self, index: usize) -> usize {
        match self {
            IndexBase::Zero => index,
            IndexBase::One => index + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One index per line.
    #[default]
    Lines,
    /// A single JSON array on one line.
    Json,
}

/// Formats the result set; the output always ends with a newline unless
/// it is an empty line listing.
pub fn render(indices: &BTreeSet<usize>, base: IndexBase, format: OutputFormat) -> serde_json::Result<String> {
    let shifted = indices.iter().map(|&i| base.apply(i));
    match format {
        OutputFormat::Lines => Ok(shifted.map(|i| format!("{i}\n")).collect()),
        OutputFormat::Json => {
            let values: Vec<usize> = shifted.collect();
            let mut out = serde_json::to_string(&values)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let set = BTreeSet::from([3, 0, 7]);
        assert_eq!(render(&set, IndexBase::Zero, OutputFormat::Lines).unwrap(), "0\n3\n7\n");
        assert_eq!(render(&set, IndexBase::One, OutputFormat::Lines).unwrap(), "1\n4\n8\n");
    }

    #[test]
    fn test_json() {
        let set = BTreeSet::from([2, 1]);
        assert_eq!(render(&set, IndexBase::Zero, OutputFormat::Json).unwrap(), "[1,2]\n");
        assert_eq!(render(&set, IndexBase::One, OutputFormat::Json).unwrap(), "[2,3]\n");
    }

    #[test]
    fn test_empty() {
        let set = BTreeSet::new();
        assert_eq!(render(&set, IndexBase::Zero, OutputFormat::Lines).unwrap(), "");
        assert_eq!(render(&set, IndexBase::One, OutputFormat::Json).unwrap(), "[]\n");
    }
}
