//! 四位固定的專家代理人與其任務
//!
//! 順序固定為 essentials → apparel → gadgets → tips，每位專家的輸出對應結果頁的一個分頁。

use crate::core::crew::Crew;
use crate::domain::model::{AgentProfile, CrewOutput, TaskSpec};
use crate::utils::error::{CrewError, Result};
use serde::Serialize;

pub const LIFESTYLE_INPUT: &str = "lifestyle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialist {
    Essentials,
    Apparel,
    Gadgets,
    Tips,
}

impl Specialist {
    pub const ALL: [Specialist; 4] = [
        Specialist::Essentials,
        Specialist::Apparel,
        Specialist::Gadgets,
        Specialist::Tips,
    ];

    /// 任務名稱，也是 CrewOutput 的查詢 key
    pub fn key(&self) -> &'static str {
        match self {
            Specialist::Essentials => "essentials",
            Specialist::Apparel => "apparel",
            Specialist::Gadgets => "gadgets",
            Specialist::Tips => "tips",
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            Specialist::Essentials => "🎒 Essentials",
            Specialist::Apparel => "👕 Apparel",
            Specialist::Gadgets => "📱 Gadgets",
            Specialist::Tips => "💡 Tips",
        }
    }

    pub fn agent(&self) -> AgentProfile {
        let (role, goal, backstory) = match self {
            Specialist::Essentials => (
                "Essential Products Analyst",
                "Identify the 5-7 absolute must-have products for the lifestyle: {lifestyle}. \
                 Focus on what is indispensable to get started.",
                "You are an efficiency expert who finds the core of any activity. If a beginner \
                 asked 'what do I REALLY need?', you would give them this list.",
            ),
            Specialist::Apparel => (
                "Technical Apparel and Accessories Specialist",
                "Recommend 5-7 functional clothing items and accessories for {lifestyle}. \
                 Focus on function (e.g. waterproof, breathable).",
                "You understand that comfort and function in clothing are crucial. You know the \
                 difference the right material makes (merino wool vs. cotton).",
            ),
            Specialist::Gadgets => (
                "Tech and Gadgets Analyst",
                "List 3-5 gadgets or tech items that elevate the {lifestyle} experience.",
                "You are a tech reviewer focused on finding the tools and gadgets that bring \
                 convenience, safety or fun to the lifestyle.",
            ),
            Specialist::Tips => (
                "Seasoned Lifestyle Advisor",
                "Give 5 short, practical tips (1-2 sentences) on buying or using gear for {lifestyle}.",
                "You are a veteran of this lifestyle. You share the pro tips only experience \
                 brings, helping people avoid common buying mistakes.",
            ),
        };

        AgentProfile {
            role: role.to_string(),
            goal: goal.to_string(),
            backstory: backstory.to_string(),
        }
    }

    pub fn task(&self) -> TaskSpec {
        let (description, expected_output) = match self {
            Specialist::Essentials => (
                "TASK: ESSENTIAL PRODUCTS\n\
                 List the 5-7 essential items for {lifestyle}. Use bullets. For each item, explain \
                 in one short sentence why it is essential. \
                 E.g. '* Hiking boots: essential to protect your ankles and...'",
                "A bullet list of 5-7 essential items, each with a one-sentence justification.",
            ),
            Specialist::Apparel => (
                "TASK: APPAREL AND ACCESSORIES\n\
                 List 5-7 functional clothing items or accessories for {lifestyle}. Use bullets. \
                 Be specific about the function (e.g. 'Waterproof/breathable jacket', 'Merino wool socks').",
                "A bullet list of 5-7 apparel items and their function.",
            ),
            Specialist::Gadgets => (
                "TASK: GADGETS AND TECHNOLOGY\n\
                 List 3-5 useful gadgets or tech items for {lifestyle}. Use bullets. \
                 Explain what each gadget does in one sentence.",
                "A bullet list of 3-5 gadgets and their function.",
            ),
            Specialist::Tips => (
                "TASK: EXPERIENCED TIPS\n\
                 Write 5 short tips (1-2 sentences) for a {lifestyle} on buying or using gear. \
                 E.g. '* Tip: always try on backpacks with weight inside at the store.'",
                "A numbered list of 5 short, practical tips.",
            ),
        };

        TaskSpec {
            name: self.key().to_string(),
            description: description.to_string(),
            expected_output: expected_output.to_string(),
            agent: self.agent(),
        }
    }
}

/// 把四個專家任務依序裝進 crew
pub fn assemble(crew: Crew) -> Crew {
    Specialist::ALL
        .iter()
        .fold(crew, |crew, specialist| crew.with_task(specialist.task()))
}

/// 四個分頁的內容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub lifestyle: String,
    pub essentials: String,
    pub apparel: String,
    pub gadgets: String,
    pub tips: String,
}

impl Recommendations {
    /// 依任務名稱直接取值；缺少任何一段都是錯誤
    pub fn from_crew_output(lifestyle: &str, output: &CrewOutput) -> Result<Self> {
        let take = |specialist: Specialist| -> Result<String> {
            output
                .get(specialist.key())
                .map(|task| task.raw.clone())
                .ok_or_else(|| CrewError::MissingTaskOutput {
                    task: specialist.key().to_string(),
                })
        };

        Ok(Self {
            lifestyle: lifestyle.to_string(),
            essentials: take(Specialist::Essentials)?,
            apparel: take(Specialist::Apparel)?,
            gadgets: take(Specialist::Gadgets)?,
            tips: take(Specialist::Tips)?,
        })
    }

    pub fn section(&self, specialist: Specialist) -> &str {
        match specialist {
            Specialist::Essentials => &self.essentials,
            Specialist::Apparel => &self.apparel,
            Specialist::Gadgets => &self.gadgets,
            Specialist::Tips => &self.tips,
        }
    }

    /// 依分頁順序列出 (分頁, 內容)
    pub fn sections(&self) -> [(Specialist, &str); 4] {
        Specialist::ALL.map(|specialist| (specialist, self.section(specialist)))
    }
}
