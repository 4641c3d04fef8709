use hopscotch_set::SkipSet;

fn main() {
    let mut skipset = SkipSet::new();

    skipset.insert(0);
    skipset.insert(5);
    println!("search(0) = {}", skipset.search(&0));
    println!("search(8) = {}", skipset.search(&8));
    println!("search(5) = {}", skipset.search(&5));

    skipset.remove(&5);
    println!("search(0) = {}", skipset.search(&0));
    println!("search(5) = {}", skipset.search(&5));

    skipset.remove(&0);
    println!("search(0) = {}", skipset.search(&0));
    println!("search(5) = {}", skipset.search(&5));

    // The type's minimum is tracked by a flag rather than a node
    skipset.insert(i32::MIN);
    println!("search(i32::MIN) = {}", skipset.search(&i32::MIN));
    skipset.remove(&i32::MIN);
    println!("search(i32::MIN) = {}", skipset.search(&i32::MIN));
}
