use crate::rules::Language;

/// Marks the end of the instruction in instruction-tuned generation output
pub const INSTRUCTION_DELIMITER: &str = "[/INST]";

const ARABIC_REFINE_PROMPT: &str = r#"أنت مساعد متخصص في تحسين النصوص العربية المفرّغة من التسجيلات الصوتية.

حسّن النص التالي مع الحفاظ على:
- المعنى الأصلي كاملاً
- المصطلحات التقنية الإنجليزية كما هي
- ترتيب الأفكار وسياقها

المطلوب:
- إضافة علامات الترقيم المناسبة
- حذف التكرار وكلمات الحشو (يعني، اممم، آآ)
- تصحيح الأخطاء الإملائية البسيطة
- تحسين التنسيق والوضوح

أعد النص المحسّن فقط دون أي تعليق.

النص الخام:
{text}
"#;

const ENGLISH_REFINE_PROMPT: &str = r#"You clean up raw speech-to-text transcripts.

Improve the text below while keeping:
- the original meaning in full
- technical terms exactly as spoken
- the order and context of ideas

Do:
- add appropriate punctuation
- remove repetition and filler words (um, uh, you know)
- fix simple spelling mistakes
- improve formatting and clarity

Return only the improved text, with no commentary.

Raw transcript:
{text}
"#;

const INSIGHTS_PROMPT: &str = r#"Analyze the interview transcript below and respond with a JSON object with exactly these keys:
- "summary": a two-sentence summary in the transcript's language
- "key_points": an array of at most 3 short key points
- "sentiment": one of "positive", "neutral", "negative"

Transcript:
{text}
"#;

/// Instruction asking a generation model to clean up a transcript
pub fn refinement_prompt(text: &str, language: Language) -> String {
    let template = match language {
        Language::Arabic => ARABIC_REFINE_PROMPT,
        Language::English => ENGLISH_REFINE_PROMPT,
    };
    template.replace("{text}", text)
}

/// Instruction asking for summary, key points and sentiment as JSON
pub fn insights_prompt(text: &str) -> String {
    INSIGHTS_PROMPT.replace("{text}", text)
}

/// Wrap a prompt in instruction-tuning markers
pub fn wrap_instruction(prompt: &str) -> String {
    format!("<s>[INST] {} {}", prompt, INSTRUCTION_DELIMITER)
}

/// Keep only what follows the last instruction delimiter, trimmed
pub fn strip_instruction_echo(generated: &str) -> &str {
    match generated.rfind(INSTRUCTION_DELIMITER) {
        Some(pos) => generated[pos + INSTRUCTION_DELIMITER.len()..].trim(),
        None => generated.trim(),
    }
}
