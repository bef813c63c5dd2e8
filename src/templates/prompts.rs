use crate::models::{LengthBudget, ReportSpec, Template};

use super::catalog::{profile_for, PROFILES};

/// Which share of the report a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Whole,
    FirstHalf,
    SecondHalf,
}

impl Part {
    fn system_pages(&self, pages: u32) -> String {
        match self {
            Part::Whole => format!("{pages} pages"),
            Part::FirstHalf => format!("{pages} pages (FIRST HALF)"),
            Part::SecondHalf => format!("{pages} pages (SECOND HALF)"),
        }
    }

    fn user_pages(&self, pages: u32) -> String {
        match self {
            Part::Whole => format!("{pages} pages"),
            Part::FirstHalf => format!("{pages} pages - PART 1"),
            Part::SecondHalf => format!("{pages} pages - PART 2 (Continue)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Prompts for one generation call.
///
/// `budget` is the budget of the requested part; the paragraph density is
/// always chosen from the whole report's page count in `spec`.
pub fn report_prompts(spec: &ReportSpec, budget: &LengthBudget, part: Part) -> PromptPair {
    PromptPair {
        system: report_system_prompt(&spec.template, spec.pages, budget, part),
        user: report_user_prompt(&spec.template, &spec.topic, budget, part),
    }
}

fn density_guidance(total_pages: u32) -> &'static str {
    match total_pages {
        0..=5 => {
            "   - Write 3-4 paragraphs per section
   - Each paragraph should be 100-150 words
   - Include specific examples and data points"
        }
        6..=15 => {
            "   - Write 5-7 paragraphs per section
   - Each paragraph should be 150-200 words
   - Include detailed examples, case studies, and data
   - Add subsections under main sections"
        }
        _ => {
            "   - Write 8-12 paragraphs per major section
   - Each paragraph should be 200-250 words
   - Include multiple case studies, detailed data analysis
   - Create subsections with their own detailed analysis
   - Add tables of data, step-by-step breakdowns
   - Provide exhaustive examples and scenarios"
        }
    }
}

fn expert_guidance(template_id: &str) -> String {
    match profile_for(template_id) {
        Some(profile) => format!(
            "5. EXPERT PERSONA for this template:\n\n   {}\n   - Write as this expert and follow these sections in order",
            profile.describe()
        ),
        None => {
            let profiles = PROFILES
                .iter()
                .map(|p| format!("   {}", p.describe()))
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("5. EXPERT PERSONAS - Choose based on template:\n\n{profiles}")
        }
    }
}

pub fn report_system_prompt(
    template_id: &str,
    total_pages: u32,
    budget: &LengthBudget,
    part: Part,
) -> String {
    let pages = budget.pages;
    let pages_label = part.system_pages(pages);
    let words = budget.required_words;
    let ideal_upper = words + 500;
    let min_words = budget.min_words;

    format!(
        "You are a world-renowned strategist and Master AI Reports Architect.

ABSOLUTE NON-NEGOTIABLE REQUIREMENTS:

1. START DIRECTLY with the report content. NO introductory phrases NO markdown, NO symbols like *, #, -, etc.

2. LENGTH IS MANDATORY - THIS IS THE MOST IMPORTANT RULE:
   - You MUST generate EXACTLY {pages_label}
   - This means {words} words MINIMUM (ideally {words}-{ideal_upper})
   - Each section must be detailed and comprehensive
   - DO NOT stop writing until you reach {words} words
   - If you generate less than {min_words} words, you have FAILED

3. HOW TO REACH {pages} PAGES:
{density}

4. FORMATTING:
   - Plain text only - NO markdown symbols
   - Only Indian Rupee symbol (\u{20b9}) allowed
   - ALL CAPS section headers
   - Two newlines between sections
   - Indian market context, late 2025

{experts}

REMEMBER: Your reputation depends on delivering EXACTLY {pages_label} ({words} words). Do NOT cut corners. Write comprehensively until you reach the required length.",
        density = density_guidance(total_pages),
        experts = expert_guidance(template_id),
    )
}

pub fn report_user_prompt(template_id: &str, topic: &str, budget: &LengthBudget, part: Part) -> String {
    let pages = budget.pages;
    let words = budget.required_words;

    format!(
        "Template: \"{template_id}\"
Target: {target} ({words} words minimum)
Topic: \"{topic}\"

IMPORTANT: Use PLAIN TEXT only - no markdown symbols, no asterisks, no bullet points, no special formatting.

CRITICAL INSTRUCTION: Write a comprehensive {pages}-page report. Do NOT stop until you have written at least {words} words. Every section must be detailed and thorough. Begin now:",
        target = part.user_pages(pages),
    )
}

pub fn enhancer_system_prompt(template: &Template) -> String {
    let title = &template.title;
    let labels = template.field_labels();

    format!(
        "You are an expert at enhancing simple ideas into detailed prompts.

TEMPLATE: {title}
DESCRIPTION: {description}
REQUIRED FIELDS: {labels}

INSTRUCTIONS:
1. Take the user's simple idea and make it more specific for a {title}
2. Add [placeholder with examples] for the main template fields: {labels}
3. Keep it professional and focused on Indian context
4. Return ONLY the enhanced prompt, no explanations

EXAMPLE:
Template: \"Business Pitch Report\" with fields: Business Idea, Target Market, Key Differentiator
User Idea: \"food delivery app\"
Enhanced: \"Create a business pitch for a hyperlocal food delivery app focusing on [Tier 2 cities in India like Indore, Coimbatore]. Target audience: [office workers and students looking for affordable daily meals]. Key differentiators: [30-minute delivery guarantee, regional cuisine focus, zero delivery fees].\"",
        description = template.description,
    )
}

pub fn enhancer_user_prompt(idea: &str) -> String {
    format!("Enhance this idea: \"{idea}\"")
}
