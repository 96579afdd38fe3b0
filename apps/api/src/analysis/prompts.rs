// ATS evaluation prompt. Both inputs are interpolated in one formatting pass
// so text from one input never lands in the other's placeholder.

const ATS_PREAMBLE: &str = "Act as an experienced ATS (Applicant Tracking System) with a deep \
    understanding of software engineering, data science, data analysis and big data roles. \
    Evaluate the resume against the job description. The job market is very competitive, \
    so give the best possible assistance for improving the resume. \
    Assign a percentage match based on the job description and list the missing keywords \
    with high accuracy.";

const ATS_RESPONSE_SCHEMA: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "JD Match": 85,
  "MissingKeywords": ["kubernetes", "terraform"],
  "Profile Summary": "Two to four sentences describing the candidate's fit.",
  "Extracted Skills": ["python", "sql"]
}

Rules:
- "JD Match" is a number between 0 and 100, without a percent sign.
- "MissingKeywords" lists job description keywords absent from the resume.
- "Extracted Skills" lists every skill found in the resume, one skill per entry."#;

/// Builds the evaluation prompt for one resume. Empty inputs still produce a prompt.
pub fn build_ats_prompt(resume_text: &str, jd_text: &str) -> String {
    format!(
        "{ATS_PREAMBLE}\n\nRESUME:\n{resume_text}\n\nJOB DESCRIPTION:\n{jd_text}\n\n{ATS_RESPONSE_SCHEMA}"
    )
}
