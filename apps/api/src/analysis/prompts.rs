// Prompt templates sent as the `Prompt` tweak of each flow.
// `{context}` and `{question}` are filled in by the flow engine, not here.

/// Template for the "Percentage Match" flow.
pub const PERCENTAGE_MATCH_TEMPLATE: &str = "{context}\n\n---\n\nCompare the job description with the resume and provide a match percentage.\n\
    Percentage Match-\nKeywords Missing-\nFinal Thoughts-\nQuestion: {question}\nAnswer:";

/// Template for the "Resume Analysis" flow.
pub const RESUME_ANALYSIS_TEMPLATE: &str = "{context}\n---\n Compare the job description with the resume and provide a detailed analysis, including:\n - Percentage Match:\n - Keywords Missing:\n - Final Thoughts:\n Question: {question} \n Answer:";

/// Labels framing the combined input of the match flow.
pub const JOB_DESCRIPTION_LABEL: &str = "Job Description:";
pub const RESUME_CONTENT_LABEL: &str = "Resume Content:";

pub const RESUME_ANALYSIS_HEADING: &str = "Resume Analysis Output:";
pub const PERCENTAGE_MATCH_HEADING: &str = "Percentage Match Output:";

pub const ANALYZE_MISSING_INPUT: &str = "Please upload a resume to analyze.";
pub const MATCH_MISSING_INPUT: &str = "Please upload a resume and enter a job description.";

pub const ANALYZE_FAILURE_PREFIX: &str = "Error analyzing resume";
pub const MATCH_FAILURE_PREFIX: &str = "Error calculating percentage match";
