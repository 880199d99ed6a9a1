use crate::quiz::definition::{QuestionSet, RawQuestion};
use crate::quiz::error::QuizError;

const PYTHON_QUESTIONS: &[(&str, [&str; 4], i64)] = &[
    (
        "Which keyword is used to define a generator in Python?",
        ["yield", "return", "def", "async"],
        1,
    ),
    (
        "What is the purpose of the @staticmethod decorator in Python?",
        [
            "Defines an instance method",
            "Defines a class method",
            "Defines a static method",
            "Defines an abstract method",
        ],
        3,
    ),
    (
        "What is the time complexity of searching for an element in a Python dictionary?",
        ["O(1)", "O(log n)", "O(n)", "O(n^2)"],
        1,
    ),
    (
        "Which module in Python is used for handling regular expressions?",
        ["regex", "re", "regexp", "pattern"],
        2,
    ),
    (
        "What does the global keyword do in Python?",
        [
            "Defines a global variable",
            "Accesses a variable outside the local scope",
            "Creates a thread-safe variable",
            "Limits variable scope to the function",
        ],
        2,
    ),
    (
        "Which built-in function can dynamically load a module in Python?",
        ["import()", "__import__()", "load()", "load_module()"],
        2,
    ),
    (
        "What is the difference between a shallow copy and a deep copy in Python?",
        [
            "Shallow copy copies all nested objects, deep copy does not",
            "Shallow copy copies references, deep copy copies objects",
            "There is no difference",
            "Deep copy creates threads",
        ],
        2,
    ),
    (
        "What does the with statement ensure in Python?",
        [
            "Encapsulation",
            "Garbage collection",
            "Resource management",
            "Type checking",
        ],
        3,
    ),
    (
        "Which method is called when an object is deleted in Python?",
        ["__destroy__", "__del__", "__cleanup__", "__delete__"],
        2,
    ),
    (
        "What is the purpose of Python's GIL (Global Interpreter Lock)?",
        [
            "Improve multi-threading performance",
            "Manage memory allocation for large objects",
            "Ensure only one thread runs Python bytecode at a time",
            "Protect the operating system kernel",
        ],
        3,
    ),
];

/// Question bank used when no CSV file is given.
pub fn builtin() -> Result<QuestionSet, QuizError> {
    QuestionSet::build(
        PYTHON_QUESTIONS
            .iter()
            .map(|(prompt, options, correct_option)| {
                RawQuestion::new(prompt, options, *correct_option)
            }),
    )
}
