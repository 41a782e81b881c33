// Starter code shown in the editor for a (language, question) pair.
// Templates only orient the user; they carry no solution logic.

use crate::types::{Language, Question};

const PYTHON_BODY: &str = r#"
def solve():
    # TODO: write your solution using input()
    # Example:
    # s = input().strip()
    # print(s == s[::-1])
    pass

if __name__ == "__main__":
    solve()
"#;

const JS_BODY: &str = r#"const fs = require('fs');
const input = fs.readFileSync(0, 'utf8').trim().split('\n');

// TODO: parse input and print output
console.log("TODO");
"#;

const C_BODY: &str = r#"#include <stdio.h>
int main() {
    // TODO: read from stdin with scanf / fgets and printf result
    printf("TODO\n");
    return 0;
}
"#;

const CPP_BODY: &str = r#"#include <bits/stdc++.h>
using namespace std;
int main() {
    ios::sync_with_stdio(false);
    cin.tie(nullptr);
    // TODO: read input and print result
    cout << "TODO\n";
    return 0;
}
"#;

const JAVA_BODY: &str = r#"import java.io.*;
import java.util.*;
public class Main {
  public static void main(String[] args) throws Exception {
    BufferedReader br = new BufferedReader(new InputStreamReader(System.in));
    // TODO: read input & print result
    System.out.println("TODO");
  }
}
"#;

/// Starter text for a language given by its identifier (`python`, `c`,
/// `cpp`, `java`, `js`). Unknown identifiers yield an empty string.
pub fn generate(language: &str, question: &Question) -> String {
    match Language::from_str(language) {
        Some(lang) => render(lang, question),
        None => String::new(),
    }
}

/// Starter text for a known language
pub fn render(language: Language, question: &Question) -> String {
    let (prefix, body) = match language {
        Language::Python => ("#", PYTHON_BODY),
        Language::Js => ("//", JS_BODY),
        Language::C => ("//", C_BODY),
        Language::Cpp => ("//", CPP_BODY),
        Language::Java => ("//", JAVA_BODY),
    };

    let mut out = comment_header(prefix, question);
    out.push_str(body);
    out
}

/// Title and description as line comments, one comment per source line
fn comment_header(prefix: &str, question: &Question) -> String {
    let mut header = String::new();
    for line in question.title.lines().chain(question.description.lines()) {
        header.push_str(prefix);
        if !line.is_empty() {
            header.push(' ');
            header.push_str(line);
        }
        header.push('\n');
    }
    header
}
