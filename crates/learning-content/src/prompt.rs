//! Prompt assembly for learning-track generation: a fixed base template
//! plus a tier-specific block, an optional topic block, and an optional
//! language directive. Pure string concatenation.

use serde::{Deserialize, Serialize};
use user_store::KnowledgeLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinanceTopic {
    #[serde(rename = "Investing Basics")]
    InvestingBasics,
    #[serde(rename = "Stock Market")]
    StockMarket,
    #[serde(rename = "Portfolio Management")]
    PortfolioManagement,
    #[serde(rename = "Risk Assessment")]
    RiskAssessment,
    #[serde(rename = "Financial Analysis")]
    FinancialAnalysis,
    #[serde(rename = "Advanced Trading Strategies")]
    AdvancedTrading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentLanguage {
    English,
    Spanish,
    French,
    German,
    Chinese,
    Japanese,
    Hindi,
    Arabic,
}

impl ContentLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentLanguage::English => "English",
            ContentLanguage::Spanish => "Spanish",
            ContentLanguage::French => "French",
            ContentLanguage::German => "German",
            ContentLanguage::Chinese => "Chinese",
            ContentLanguage::Japanese => "Japanese",
            ContentLanguage::Hindi => "Hindi",
            ContentLanguage::Arabic => "Arabic",
        }
    }
}

/// Sampling temperature by tier: lower for beginners for clearer, more
/// deterministic explanations, higher for advanced users for richness.
pub fn temperature_for(level: KnowledgeLevel) -> f64 {
    match level {
        KnowledgeLevel::Beginner => 0.5,
        KnowledgeLevel::Intermediate => 0.65,
        KnowledgeLevel::Advanced => 0.75,
    }
}

const BASE_PROMPT: &str = r#"
Generate a structured finance learning track that is informative, educational and engaging.

The track should include the following:
1. A catchy title for the learning track
2. A brief description (2-3 sentences) explaining what the user will learn
3. 3-5 sections of learning content, each with:
   - Clear section title
   - Educational content about finance/stock markets (with some markdown formatting)
   - Real world examples or analogies to illustrate concepts
   - 1-3 quiz questions with 4 options each and the correct answer index (0-3)

Format the response as a valid JSON object with this exact structure:
{
  "title": "Title of Learning Track",
  "description": "Brief description of what the user will learn",
  "sections": [
    {
      "title": "Section Title",
      "content": "Educational content with markdown",
      "quiz": [
        {
          "question": "Quiz question text?",
          "options": ["Option A", "Option B", "Option C", "Option D"],
          "answerIndex": 0
        }
      ]
    }
  ]
}
"#;

fn level_prompt(level: KnowledgeLevel) -> &'static str {
    match level {
        KnowledgeLevel::Beginner => {
            "\nFocus on fundamental concepts and basic terminology that would be suitable for \
             complete beginners.\nContent should:\n\
             - Explain basic financial terms and concepts in simple language\n\
             - Use everyday analogies to explain complex ideas\n\
             - Avoid industry jargon or explain it thoroughly when used\n\
             - Include very basic concepts about investing, saving, and financial markets\n\
             - Cover topics like what stocks are, how markets work, basic investment approaches\n\n\
             The overall difficulty level should be appropriate for someone with NO prior \
             finance knowledge.\n"
        }
        KnowledgeLevel::Intermediate => {
            "\nBuild on fundamental concepts and introduce moderately complex strategies and \
             analysis techniques.\nContent should:\n\
             - Assume basic knowledge of financial markets and investment vehicles\n\
             - Introduce more technical concepts and strategies\n\
             - Explain intermediate concepts like portfolio diversification, asset allocation, \
             and risk assessment\n\
             - Include some industry terminology with brief explanations\n\
             - Cover topics like fundamental analysis, technical indicators, and investment \
             strategies\n\
             - Introduce concepts like P/E ratios, market cycles, and economic indicators\n\n\
             The overall difficulty level should be appropriate for someone with SOME finance \
             knowledge who understands basic concepts.\n"
        }
        KnowledgeLevel::Advanced => {
            "\nFocus on sophisticated investment strategies, complex market analysis, and \
             advanced concepts.\nContent should:\n\
             - Assume solid understanding of financial markets, investment vehicles, and \
             economics\n\
             - Discuss advanced concepts and strategies in detail\n\
             - Include complex topics like options strategies, derivatives, hedging techniques, \
             and alternative investments\n\
             - Use technical language and industry terminology freely\n\
             - Cover topics like advanced portfolio theory, factor investing, macroeconomic \
             analysis\n\
             - Discuss complex topics like volatility strategies, statistical arbitrage, or \
             sector rotation tactics\n\n\
             The overall difficulty level should be challenging and appropriate for experienced \
             investors with SIGNIFICANT finance knowledge.\n"
        }
    }
}

fn topic_prompt(topic: FinanceTopic) -> &'static str {
    match topic {
        FinanceTopic::InvestingBasics => {
            "\nFocus on core investing concepts and fundamentals that build a strong foundation.\n"
        }
        FinanceTopic::StockMarket => {
            "\nFocus specifically on stock market mechanics, analysis techniques, and trading \
             strategies.\n"
        }
        FinanceTopic::PortfolioManagement => {
            "\nFocus on building, optimizing, and managing investment portfolios for different \
             objectives.\n"
        }
        FinanceTopic::RiskAssessment => {
            "\nFocus on understanding, measuring, and mitigating various financial risks in \
             investing.\n"
        }
        FinanceTopic::FinancialAnalysis => {
            "\nFocus on analyzing financial statements, metrics, and indicators to evaluate \
             investments.\n"
        }
        FinanceTopic::AdvancedTrading => {
            "\nFocus on sophisticated trading strategies, technical analysis, and market timing \
             techniques.\n"
        }
    }
}

/// Assemble the full instruction string for one generation request.
pub fn build_prompt(
    level: KnowledgeLevel,
    topic: Option<FinanceTopic>,
    language: Option<ContentLanguage>,
) -> String {
    let mut prompt = String::from(BASE_PROMPT);
    prompt.push_str(level_prompt(level));
    if let Some(topic) = topic {
        prompt.push_str(topic_prompt(topic));
    }
    if let Some(language) = language {
        if language != ContentLanguage::English {
            prompt.push_str(&format!(
                "\nWrite all titles, content and quiz questions in {}.\n",
                language.as_str()
            ));
        }
    }
    prompt
}
