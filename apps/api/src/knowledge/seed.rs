use std::collections::BTreeMap;

pub(super) const KNOWLEDGE: &[(&str, &[&str])] = &[
    (
        "technical",
        &[
            "React Hooks let function components use state and other React features",
            "useState manages local state, useEffect handles side effects",
            "Custom hooks let components reuse stateful logic",
            "RESTful APIs follow REST architecture principles with standard HTTP methods",
            "GET reads data, POST creates, PUT updates, DELETE removes",
            "HTTP status codes report the outcome: 200 OK, 201 Created, 404 Not Found, 500 Server Error",
        ],
    ),
    (
        "behavioral",
        &[
            "The STAR method (Situation, Task, Action, Result) structures behavioral answers",
            "Metrics and quantifiable results strengthen an answer",
            "Interviewers value evidence of learning and personal growth",
            "Mistakes should be told honestly, focusing on the fix and the lesson learned",
            "Answers should be specific and grounded in personal experience",
        ],
    ),
    (
        "teamwork",
        &[
            "Effective communication is the key to successful teamwork",
            "Active listening and win-win solutions resolve conflicts",
            "Proactively contributing to a positive atmosphere raises team productivity",
            "Cross-functional collaboration requires adaptation and flexibility",
            "Celebrating team wins strengthens group cohesion",
        ],
    ),
    (
        "leadership",
        &[
            "Leading without formal authority relies on influence and credibility",
            "Building consensus and a shared vision is essential to leading teams",
            "Effective leaders adapt their style to the situation and the team",
            "Effective delegation empowers the team and grows its capabilities",
            "Leaders must model the values they promote",
        ],
    ),
    (
        "problem-solving",
        &[
            "A structured process improves the quality of solutions",
            "Clearly defining the problem is the critical first step",
            "Generating several alternatives before deciding widens the options",
            "Weighing pros and cons supports informed decisions",
            "Documenting the process makes future learning easier",
        ],
    ),
    (
        "communication",
        &[
            "Adapting the message to the audience improves understanding",
            "Analogies simplify complex technical concepts",
            "Visual aids complement verbal communication",
            "Checking for understanding ensures effective communication",
            "Two-way feedback improves the quality of communication",
        ],
    ),
    (
        "adaptability",
        &[
            "An agile mindset embraces change as an opportunity",
            "Constant communication with stakeholders reduces uncertainty",
            "Prioritizing by business value maximizes impact",
            "Flexible architecture makes adapting to change easier",
            "Iterative development allows continuous adjustment",
        ],
    ),
    (
        "culture-fit",
        &[
            "Authentic motivations build trust",
            "Connecting personal work to organizational impact is valuable",
            "Balancing technical and human concerns shows maturity",
            "Genuine passion for the work is contagious",
            "Personal values should align with the organization's values",
        ],
    ),
];

pub(super) const INTERVIEW_TIPS: &[(&str, &[&str])] = &[
    (
        "general",
        &[
            "Prepare specific stories you can adapt to different questions",
            "Practice the STAR method for behavioral questions",
            "Research the company and connect your answers to its values",
            "Prepare thoughtful questions to ask the interviewer",
            "Practice explaining technical concepts simply",
        ],
    ),
    (
        "technical",
        &[
            "Explain your thought process step by step",
            "Cover trade-offs and design considerations",
            "Mention edge cases and error handling",
            "Use concrete examples from your experience",
            "Sketch diagrams when appropriate",
        ],
    ),
    (
        "behavioral",
        &[
            "Be specific with dates, numbers and results",
            "Focus on your personal contribution, not the team's",
            "Include what you learned from each experience",
            "Prepare examples of both successes and failures",
            "Practice telling stories concisely",
        ],
    ),
];

pub(super) fn to_map(table: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    table
        .iter()
        .map(|(category, sentences)| {
            (
                category.to_string(),
                sentences.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}
