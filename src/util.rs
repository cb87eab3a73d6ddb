use collections::HashTable;

/// Prints how entries are spread across the table's buckets, to eyeball how
/// well the hash function is distributing keys.
///
/// With `graphic` set, every slot gets a line with a `#` bar proportional to
/// its occupancy; either way the smallest and largest occupied buckets are
/// summarized at the end.
pub fn report_distribution<V>(table: &HashTable<V>, graphic: bool) {
    let mut min = usize::MAX;
    let mut max = 0;

    for (pos, len) in table.slot_lengths().enumerate() {
        if len > 0 {
            min = min.min(len);
            max = max.max(len);
        }
        if graphic {
            println!("[pos {pos:2} - {len:2}] {}", "#".repeat(len));
        }
    }

    if max == 0 {
        println!("Table is empty");
        return;
    }
    println!("Smallest bucket: {min}");
    println!("Largest bucket: {max}");
}
