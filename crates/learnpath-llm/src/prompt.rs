//! Prompt construction for course outline generation.

use learnpath_models::LearningPurpose;

/// System instruction sent with every generation request.
pub const SYSTEM_PROMPT: &str = "You are an expert educational content curator. \
Always respond with valid JSON only, no additional text.";

/// How the outline should approach the topic for each purpose.
pub fn purpose_approach(purpose: LearningPurpose) -> &'static str {
    match purpose {
        LearningPurpose::Overview => {
            "a comprehensive overview and introduction to the topic, covering key concepts, \
             fundamentals, and the big picture"
        }
        LearningPurpose::Steps => {
            "a step-by-step tutorial approach, breaking down the topic into clear, sequential \
             learning steps"
        }
        LearningPurpose::ProjectBased => {
            "a hands-on, project-based learning approach where you build something practical \
             while learning"
        }
    }
}

/// Build the user prompt for a topic.
pub fn build_course_prompt(topic: &str, purpose: LearningPurpose, intent: Option<&str>) -> String {
    let goal = intent
        .map(|i| format!("Learning Goal: {}\n", i))
        .unwrap_or_default();

    format!(
        r#"You are an expert educational content curator. Create a structured learning path for the topic: "{topic}"

Learning Purpose: {approach}
{goal}
Generate a well-structured course outline with:
1. A compelling course title
2. A detailed course description (2-3 sentences)
3. 3-5 clear learning objectives
4. A sequence of 8-12 video topics that should be covered, ordered logically

For each video topic, provide:
- A descriptive title
- A brief description of what should be covered
- 3-5 search keywords that would help find the best YouTube videos for this topic

Format your response as JSON with this structure:
{{
  "title": "Course Title",
  "description": "Course description",
  "learningObjectives": ["objective1", "objective2", ...],
  "videoSequence": [
    {{
      "order": 1,
      "title": "Video Topic Title",
      "description": "What this video should cover",
      "searchKeywords": ["keyword1", "keyword2", "keyword3"]
    }},
    ...
  ]
}}

Make sure the sequence flows logically and builds upon previous concepts."#,
        topic = topic,
        approach = purpose_approach(purpose),
        goal = goal,
    )
}
