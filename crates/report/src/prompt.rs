use crate::schema::PolicyCategory;

/// One sample input/output pair shown to the model to pin down the format.
pub struct WorkedExample {
    pub input: &'static str,
    pub output: &'static str,
}

const SAMPLE_INPUT: &str = "Company XYZ is committed to sustainability and reducing its environmental impact. \
The company has invested in renewable energy sources such as wind and solar, aiming to reduce carbon emissions by 50% by 2030. \
Additionally, XYZ focuses on social initiatives by supporting local communities through education programs and providing healthcare services to underprivileged areas. \
The company also emphasizes strong corporate governance by ensuring transparency in its operations and adhering to strict ethical guidelines.";

pub fn worked_example(category: PolicyCategory) -> WorkedExample {
    let output = match category {
        PolicyCategory::Environmental => "- Invested in renewable energy sources such as wind and solar.\n\
             - Aims to reduce carbon emissions by 50% by 2030.",
        PolicyCategory::Social => "- Supports local communities through education programs.\n\
             - Provides healthcare services to underprivileged areas.",
        PolicyCategory::Governance => "- Ensures transparency in its operations.\n\
             - Adheres to strict ethical guidelines.",
    };

    WorkedExample {
        input: SAMPLE_INPUT,
        output,
    }
}

/// Prompt asking for one category's policies only, as bullet points.
pub fn build_category_prompt(
    company_name: &str,
    category: PolicyCategory,
    web_data: &str,
    example: Option<&WorkedExample>,
) -> String {
    let label = category.label();

    let mut prompt = format!(
        "Context: ESG policies. Based on the following data scraped from the web, provide a detailed summary of ONLY the {label} policies of the {company_name} company.\n\
         Do not include any preambles or concluding statements.\n\
         Only mention the data related to the company's {label} policies.\n\
         Write your summary in bullet points.\n"
    );

    if let Some(example) = example {
        prompt.push_str(&format!(
            "You'll be given a sample input and output to get a clue of the expected format, do not include this data in your response.\n\
             Sample Input: \"{}\"\n\
             Sample Output: \"{}\"\n",
            example.input, example.output
        ));
    }

    prompt.push_str(&format!("Web data: {}", web_data));
    prompt
}

/// Prompt asking for all three categories at once as a JSON object.
pub fn build_structured_prompt(company_name: &str, summaries: &str) -> String {
    format!(
        r#"You have been given an ESG policy summary of the {company_name} company. You are to further refine it,
and provide a detailed report of each policy (Environmental, Social, Governance) separately. Ensure that your responses for each
category do not overlap each other.
Write in a professional tone.
Do not include any preambles or concluding statements.
Write your report in bullet points. Present the final response in JSON format.
You'll be given a sample input and output to get a clue of the expected format, do not include this data in your response.
Sample Input: "{SAMPLE_INPUT}"
Sample Output: "{{
  "environmental": "Invested in renewable energy sources such as wind and solar, aiming to reduce carbon emissions by 50% by 2030.",
  "social": "Supports local communities through education programs and provides healthcare services to underprivileged areas.",
  "governance": "Ensures transparency in operations and adheres to strict ethical guidelines."
}}"
The ESG policy summary is as follows: {summaries}"#
    )
}
