use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One discrete ideograph and how often it occurs in the analysed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterCount {
    pub character: char,
    pub count: usize,
}

impl CharacterCount {
    pub fn new(character: char, count: usize) -> Self {
        Self { character, count }
    }
}

impl fmt::Display for CharacterCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.character, self.count)
    }
}

/// Ideograph statistics of one input text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjiStats {
    /// Characters in the text, ideographs or not
    pub characters: usize,
    /// Ideograph occurrences
    pub kanji_total: usize,
    /// One entry per distinct ideograph, most frequent first
    pub counts: Vec<CharacterCount>,
}

impl KanjiStats {
    /// Number of distinct ideographs
    pub fn discrete(&self) -> usize {
        self.counts.len()
    }

    pub fn kanji_set(&self) -> HashSet<char> {
        self.counts.iter().map(|c| c.character).collect()
    }
}

/// School grade a kanji is taught in (kyouiku kanji), or `Beyond`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeBucket {
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
    Beyond,
}

impl GradeBucket {
    /// Every bucket in report order
    pub const ALL: [GradeBucket; 7] = [
        GradeBucket::Grade1,
        GradeBucket::Grade2,
        GradeBucket::Grade3,
        GradeBucket::Grade4,
        GradeBucket::Grade5,
        GradeBucket::Grade6,
        GradeBucket::Beyond,
    ];

    /// Position of the bucket in `ALL`
    pub fn index(&self) -> usize {
        match self {
            GradeBucket::Grade1 => 0,
            GradeBucket::Grade2 => 1,
            GradeBucket::Grade3 => 2,
            GradeBucket::Grade4 => 3,
            GradeBucket::Grade5 => 4,
            GradeBucket::Grade6 => 5,
            GradeBucket::Beyond => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeBucket::Grade1 => "grade-1",
            GradeBucket::Grade2 => "grade-2",
            GradeBucket::Grade3 => "grade-3",
            GradeBucket::Grade4 => "grade-4",
            GradeBucket::Grade5 => "grade-5",
            GradeBucket::Grade6 => "grade-6",
            GradeBucket::Beyond => "beyond",
        }
    }

    /// Heading used in reports
    pub fn label(&self) -> &'static str {
        match self {
            GradeBucket::Grade1 => "第一学年",
            GradeBucket::Grade2 => "第二学年",
            GradeBucket::Grade3 => "第三学年",
            GradeBucket::Grade4 => "第四学年",
            GradeBucket::Grade5 => "第五学年",
            GradeBucket::Grade6 => "第六学年",
            GradeBucket::Beyond => "中学以上",
        }
    }
}

/// Character counts partitioned by grade, each bucket most frequent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeBreakdown {
    buckets: [Vec<CharacterCount>; 7],
}

impl GradeBreakdown {
    pub fn push(&mut self, bucket: GradeBucket, count: CharacterCount) {
        self.buckets[bucket.index()].push(count);
    }

    pub fn get(&self, bucket: GradeBucket) -> &[CharacterCount] {
        &self.buckets[bucket.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GradeBucket, &[CharacterCount])> {
        GradeBucket::ALL
            .into_iter()
            .map(move |bucket| (bucket, self.get(bucket)))
    }

    /// Sum of bucket sizes
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}
