//! Prompt construction for script generation.
//!
//! The prompt is a pure function of the [`GenerationRequest`]: the same
//! categories in the same order always produce the same text.

use crate::generation::GenerationRequest;

/// System instruction sent alongside every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert Python developer who writes safe, \
readable, dependency-free automation scripts. Respond with Python source code only, \
without explanations or surrounding prose.";

/// Build the user prompt listing every category in request order.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::from(
        "Write a complete Python 3 script that organizes the files in the user's \
Downloads folder by moving each file into a sub-folder named after its category.\n\n\
Categories (folder name: extensions):\n",
    );

    for rule in &request.categories {
        prompt.push_str(&format!(
            "- {}: {}\n",
            rule.name(),
            rule.extensions().join(", ")
        ));
    }

    prompt.push_str(
        "\nRequirements:\n\
- Locate the Downloads folder with pathlib (Path.home() / \"Downloads\").\n\
- Use only the Python standard library (os, shutil, pathlib).\n\
- Create each category folder only when a file is moved into it.\n\
- Match extensions case-insensitively; when several extensions match, the longest wins \
(so \".tar.gz\" beats \".gz\").\n\
- Leave directories and files that match no category where they are.\n\
- Never overwrite an existing file: append a numeric suffix to the name instead.\n\
- Print each move and a final summary of how many files went into each folder.\n\
- Wrap the logic in a main() function guarded by if __name__ == \"__main__\".\n\n\
Return only the Python code.",
    );

    prompt
}
