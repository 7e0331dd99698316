//! The fixed book catalog written by the seed script.

use bookstore::Book;

/// Number of books in [`classic_books`].
pub const CATALOG_SIZE: usize = 10;

/// Ten science fiction, dystopian and gothic classics.
pub fn classic_books() -> Vec<Book> {
    vec![
        Book::new(
            "Dune",
            "Frank Herbert",
            "Science Fiction",
            1965,
            15.99,
            true,
            412,
            "Chilton Books",
        ),
        Book::new(
            "Foundation",
            "Isaac Asimov",
            "Science Fiction",
            1951,
            11.49,
            true,
            255,
            "Gnome Press",
        ),
        Book::new(
            "Do Androids Dream of Electric Sheep?",
            "Philip K. Dick",
            "Science Fiction",
            1968,
            12.99,
            true,
            210,
            "Doubleday",
        ),
        Book::new(
            "Frankenstein",
            "Mary Shelley",
            "Gothic Fiction",
            1818,
            8.99,
            true,
            280,
            "Lackington, Hughes, Harding, Mavor & Jones",
        ),
        Book::new(
            "The Martian",
            "Andy Weir",
            "Science Fiction",
            2011,
            14.99,
            false,
            369,
            "Crown Publishing",
        ),
        Book::new(
            "Ready Player One",
            "Ernest Cline",
            "Science Fiction",
            2011,
            13.50,
            true,
            374,
            "Random House",
        ),
        Book::new(
            "The Time Machine",
            "H.G. Wells",
            "Science Fiction",
            1895,
            7.99,
            true,
            118,
            "William Heinemann",
        ),
        Book::new(
            "Fahrenheit 451",
            "Ray Bradbury",
            "Dystopian",
            1953,
            10.99,
            true,
            249,
            "Ballantine Books",
        ),
        Book::new(
            "The Handmaid's Tale",
            "Margaret Atwood",
            "Dystopian",
            1985,
            12.49,
            false,
            311,
            "McClelland & Stewart",
        ),
        Book::new(
            "Hyperion",
            "Dan Simmons",
            "Science Fiction",
            1989,
            16.99,
            true,
            482,
            "Doubleday",
        ),
    ]
}

/// The book added by the explorer's create step.
pub fn extra_book() -> Book {
    Book::new(
        "I, Robot",
        "Isaac Asimov",
        "Science Fiction",
        1950,
        9.99,
        true,
        253,
        "Gnome Press",
    )
}
