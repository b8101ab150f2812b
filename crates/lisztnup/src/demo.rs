//! Built-in demo deck for sessions without a catalog.

use lisztnup_timeline::{Card, CardId, YearSpan};

/// (composer, work, begin, end)
const WORKS: &[(&str, &str, i32, i32)] = &[
    ("Claudio Monteverdi", "L'Orfeo", 1607, 1607),
    ("Henry Purcell", "Dido and Aeneas", 1688, 1689),
    ("Antonio Vivaldi", "The Four Seasons", 1718, 1720),
    ("Johann Sebastian Bach", "Brandenburg Concertos", 1711, 1721),
    ("Johann Sebastian Bach", "Mass in B minor", 1733, 1749),
    ("George Frideric Handel", "Water Music", 1717, 1717),
    ("George Frideric Handel", "Messiah", 1741, 1741),
    ("Joseph Haydn", "The Creation", 1796, 1798),
    ("Joseph Haydn", "Symphony No. 94 \"Surprise\"", 1791, 1791),
    ("Wolfgang Amadeus Mozart", "Eine kleine Nachtmusik", 1787, 1787),
    ("Wolfgang Amadeus Mozart", "Requiem", 1791, 1791),
    ("Wolfgang Amadeus Mozart", "The Magic Flute", 1791, 1791),
    ("Ludwig van Beethoven", "Moonlight Sonata", 1801, 1801),
    ("Ludwig van Beethoven", "Symphony No. 5", 1804, 1808),
    ("Ludwig van Beethoven", "Symphony No. 9", 1822, 1824),
    ("Franz Schubert", "Winterreise", 1827, 1827),
    ("Franz Schubert", "Symphony No. 8 \"Unfinished\"", 1822, 1822),
    ("Hector Berlioz", "Symphonie fantastique", 1830, 1830),
    ("Frédéric Chopin", "Piano Concerto No. 1", 1830, 1830),
    ("Felix Mendelssohn", "A Midsummer Night's Dream", 1842, 1842),
    ("Robert Schumann", "Piano Concerto", 1841, 1845),
    ("Franz Liszt", "Piano Sonata in B minor", 1852, 1853),
    ("Richard Wagner", "Tristan und Isolde", 1857, 1859),
    ("Giuseppe Verdi", "La traviata", 1853, 1853),
    ("Giuseppe Verdi", "Aida", 1870, 1871),
    ("Johannes Brahms", "Ein deutsches Requiem", 1865, 1868),
    ("Pyotr Ilyich Tchaikovsky", "Swan Lake", 1875, 1876),
    ("Pyotr Ilyich Tchaikovsky", "The Nutcracker", 1891, 1892),
    ("Antonín Dvořák", "Symphony No. 9 \"From the New World\"", 1893, 1893),
    ("Giacomo Puccini", "La bohème", 1895, 1896),
    ("Claude Debussy", "Prélude à l'après-midi d'un faune", 1892, 1894),
    ("Gustav Mahler", "Symphony No. 5", 1901, 1902),
    ("Sergei Rachmaninoff", "Piano Concerto No. 2", 1900, 1901),
    ("Igor Stravinsky", "The Rite of Spring", 1911, 1913),
    ("Gustav Holst", "The Planets", 1914, 1916),
    ("Maurice Ravel", "Boléro", 1928, 1928),
    ("Sergei Prokofiev", "Romeo and Juliet", 1935, 1935),
    ("Dmitri Shostakovich", "Symphony No. 7", 1941, 1941),
    ("Aaron Copland", "Appalachian Spring", 1943, 1944),
    ("Olivier Messiaen", "Quartet for the End of Time", 1940, 1941),
];

/// Every demo work as a card, ids numbered from 1.
pub fn demo_cards() -> Vec<Card> {
    WORKS
        .iter()
        .zip(1..)
        .filter_map(|(&(composer, title, begin, end), id)| {
            Card::new(
                CardId(id),
                title,
                composer,
                "",
                YearSpan::new(Some(begin), Some(end)),
            )
        })
        .collect()
}
