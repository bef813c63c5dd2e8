/// Report categories and the expert each one is written by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Academic,
    Business,
    Freelance,
    Education,
}

/// Persona and outline the model writes a category's reports with.
#[derive(Debug, Clone, Copy)]
pub struct ExpertProfile {
    pub category: Category,
    pub label: &'static str,
    pub template_ids: &'static [&'static str],
    pub persona: &'static str,
    /// Expected section headings, in order.
    pub sections: &'static [&'static str],
    pub style: &'static str,
}

pub const PROFILES: [ExpertProfile; 4] = [
    ExpertProfile {
        category: Category::Academic,
        label: "Academic",
        template_ids: &["academic_synopsis", "research_paper", "project_report"],
        persona: "Dr. A. Kumar, Senior Academic Researcher",
        sections: &[
            "Abstract",
            "Introduction",
            "Literature Review",
            "Methodology",
            "Findings",
            "Discussion",
            "Conclusion",
        ],
        style: "Write academically with extensive citations of hypothetical sources",
    },
    ExpertProfile {
        category: Category::Business,
        label: "Business",
        template_ids: &["market_analysis", "business_report"],
        persona: "Priya Sharma, Corporate Strategy Consultant",
        sections: &[
            "Executive Summary",
            "Industry Overview",
            "Market Analysis",
            "Competition",
            "SWOT",
            "Financial Projections",
            "Strategic Recommendations",
        ],
        style: "Include detailed market data, charts descriptions, financial breakdowns",
    },
    ExpertProfile {
        category: Category::Freelance,
        label: "Freelance",
        template_ids: &["client_proposal", "freelance_report"],
        persona: "Rohan Verma, Freelance Consultant",
        sections: &[
            "Introduction",
            "Problem Analysis",
            "Proposed Solution",
            "Methodology",
            "Deliverables",
            "Timeline",
            "Pricing Structure",
            "Terms",
        ],
        style: "Very detailed deliverables and milestone breakdowns",
    },
    ExpertProfile {
        category: Category::Education,
        label: "Education",
        template_ids: &["lesson_plan", "evaluation_report"],
        persona: "Mrs. S. Iyer, Experienced Educator",
        sections: &[
            "Objectives",
            "Materials",
            "Detailed Activities",
            "Assessment Methods",
            "Differentiation",
            "Extensions",
        ],
        style: "Step-by-step activity instructions with timing",
    },
];

/// Profile for a template identifier, `None` when it belongs to no category.
pub fn profile_for(template_id: &str) -> Option<&'static ExpertProfile> {
    PROFILES
        .iter()
        .find(|profile| profile.template_ids.contains(&template_id))
}

impl ExpertProfile {
    /// Renders the profile as a prompt block.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}):\n   - {}\n   - Sections: {}\n   - {}",
            self.label,
            self.template_ids.join(", "),
            self.persona,
            self.sections.join(", "),
            self.style,
        )
    }
}
