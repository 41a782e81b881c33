use crate::types::Question;
use rand::Rng;

/// The question bank. Order is stable; a question's index is its identity.
pub const QUESTIONS: &[Question] = &[
    Question {
        title: "Palindrome Check",
        description: "Read a single word and print true if it reads the same forwards and backwards, otherwise false.",
        input: "racecar",
        output: "true",
    },
    Question {
        title: "Sum of Array",
        description: "The first line holds n, the second line n space-separated integers. Print their sum.",
        input: "5\n1 2 3 4 5",
        output: "15",
    },
    Question {
        title: "Reverse a String",
        description: "Read a line of text and print it reversed.",
        input: "hello world",
        output: "dlrow olleh",
    },
    Question {
        title: "Nth Fibonacci Number",
        description: "Read n (0 <= n <= 50) and print F(n), where F(0) = 0 and F(1) = 1.",
        input: "10",
        output: "55",
    },
    Question {
        title: "Maximum Element",
        description: "The first line holds n, the second line n space-separated integers. Print the largest one.",
        input: "6\n3 -1 9 4 9 2",
        output: "9",
    },
    Question {
        title: "Count Vowels",
        description: "Read a line of lowercase text and print how many vowels (a, e, i, o, u) it contains.",
        input: "data structures",
        output: "5",
    },
    Question {
        title: "Balanced Brackets",
        description: "Read a string of the characters ()[]{} and print true if every bracket is closed in the right order, otherwise false.",
        input: "{[()]}[]",
        output: "true",
    },
    Question {
        title: "Binary Search",
        description: "The first line holds n and a target, the second line n sorted integers. Print the 0-based index of the target, or -1 if it is absent.",
        input: "7 23\n2 5 8 12 16 23 38",
        output: "5",
    },
    Question {
        title: "Two Sum",
        description: "The first line holds n and a target, the second line n integers. Print the 0-based indices i < j of the pair summing to target, separated by a space.",
        input: "4 9\n2 7 11 15",
        output: "0 1",
    },
    Question {
        title: "Factorial",
        description: "Read n (0 <= n <= 20) and print n!.",
        input: "5",
        output: "120",
    },
];

const _: () = assert!(!QUESTIONS.is_empty(), "question bank must not be empty");

pub fn all() -> &'static [Question] {
    QUESTIONS
}

pub fn get(index: usize) -> Option<&'static Question> {
    QUESTIONS.get(index)
}

/// Pick a question uniformly at random. Repeats across calls are allowed.
pub fn pick_random() -> (usize, &'static Question) {
    pick_random_with(&mut rand::thread_rng())
}

pub fn pick_random_with<R: Rng + ?Sized>(rng: &mut R) -> (usize, &'static Question) {
    let index = rng.gen_range(0..QUESTIONS.len());
    (index, &QUESTIONS[index])
}
