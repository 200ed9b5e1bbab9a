use serde::Serialize;

pub struct CategoryInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        key: "numerical",
        name: "Numerical Reasoning",
        description: "Mathematical calculations • Number operations",
    },
    CategoryInfo {
        key: "verbal",
        name: "Verbal Reasoning",
        description: "Language comprehension • Reading analysis",
    },
    CategoryInfo {
        key: "logical",
        name: "Logical Reasoning",
        description: "Logic patterns • Reasoning skills",
    },
    CategoryInfo {
        key: "abstract",
        name: "Abstract/Non-Verbal Reasoning",
        description: "Visual patterns • Shape sequences",
    },
    CategoryInfo {
        key: "quantitative",
        name: "Quantitative Aptitude",
        description: "Probability • Statistics • Algebra",
    },
    CategoryInfo {
        key: "datainterpretation",
        name: "Data Interpretation",
        description: "Charts • Graphs • Data analysis",
    },
    CategoryInfo {
        key: "criticalthinking",
        name: "Critical Thinking",
        description: "Analysis • Evaluation • Problem solving",
    },
    CategoryInfo {
        key: "spatial",
        name: "Spatial Reasoning",
        description: "3D visualization • Spatial relationships",
    },
    CategoryInfo {
        key: "mechanical",
        name: "Mechanical Aptitude",
        description: "Mechanics • Physics • Engineering",
    },
    CategoryInfo {
        key: "situational",
        name: "Situational Judgment",
        description: "Workplace scenarios • Decision making",
    },
    CategoryInfo {
        key: "diagrammatic",
        name: "Diagrammatic Reasoning",
        description: "Flow charts • Process diagrams",
    },
    CategoryInfo {
        key: "inductive",
        name: "Inductive Reasoning",
        description: "Pattern identification • Rule finding",
    },
    CategoryInfo {
        key: "deductive",
        name: "Deductive Reasoning",
        description: "Logical conclusions • Rule application",
    },
    CategoryInfo {
        key: "analytical",
        name: "Analytical Reasoning",
        description: "Data analysis • Logical structure",
    },
    CategoryInfo {
        key: "verbalanalogies",
        name: "Verbal Analogies",
        description: "Word relationships • Comparisons",
    },
    CategoryInfo {
        key: "errorchecking",
        name: "Error Checking",
        description: "Attention to detail • Accuracy",
    },
    CategoryInfo {
        key: "numbersequences",
        name: "Number Sequences",
        description: "Number patterns • Series completion",
    },
    CategoryInfo {
        key: "wordproblems",
        name: "Word Problems",
        description: "Text-based math • Real-world scenarios",
    },
    CategoryInfo {
        key: "logicalpuzzles",
        name: "Logical Puzzles",
        description: "Brain teasers • Logic games",
    },
    CategoryInfo {
        key: "patternrecognition",
        name: "Pattern Recognition",
        description: "Visual patterns • Sequence identification",
    },
];

pub fn is_known_category(key: &str) -> bool {
    CATEGORIES.iter().any(|c| c.key == key)
}

/// Entry of `GET /api/categories`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub key: String,
    pub name: String,
    pub description: String,
    pub question_count: usize,
}
