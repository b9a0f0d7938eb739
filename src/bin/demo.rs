//! A small tour of a list view, over an in-process table

use front_desk::traits::TableRecord;
use front_desk::{ClientDraft, ClientRecord, ListView, MemoryTable};

fn sample(id: i64, name: &str, company: &str) -> ClientRecord {
    ClientRecord::from_draft(
        id,
        &ClientDraft {
            name: name.to_string(),
            company: company.to_string(),
            email: format!("contact@{}.test", company.to_lowercase().replace(' ', "-")),
            phone: "+56 9 5555 5555".to_string(),
            tax_id: "11.111.111-1".to_string(),
        },
    )
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let rows = vec![
        sample(1, "Rosa Díaz", "Acme Corp"),
        sample(2, "Pedro Soto", "Soto y Hnos"),
        sample(3, "Ana Rojas", "Panadería Central"),
        sample(4, "Luis Vera", "Vera Import"),
        sample(5, "Carla Muñoz", "Muñoz Textil"),
        sample(6, "Diego Pinto", "Pinto Verde"),
        sample(7, "Elena Brito", "Brito Cafe"),
        sample(8, "Tomás Lagos", "Lagos Austral"),
        sample(9, "Sofía Reyes", "Reyes Flores"),
        sample(10, "Marco Vidal", "Vidal Motors"),
        sample(11, "Paula Núñez", "Núñez Deco"),
        sample(12, "Jorge Fuentes", "Fuentes Pan"),
    ];
    let table = MemoryTable::new_with_rows(rows, 13);

    let (sender, receiver) = front_desk::notice_channel();
    let mut list = ListView::new_with_notice_channel(table, sender);

    list.refresh().await;
    println!("---- page 1 ----");
    front_desk::utils::print_row_table(list.rows(), list.pager().total());

    list.goto_page(2).await;
    println!("---- page 2 ----");
    front_desk::utils::print_row_table(list.rows(), list.pager().total());

    list.search("pan").await;
    println!("---- searching \"pan\" ----");
    front_desk::utils::print_row_table(list.rows(), list.pager().total());

    list.search("").await;
    list.create(&ClientDraft {
        name: "Nueva Clienta".to_string(),
        company: "La Esquina".to_string(),
        email: "hola@laesquina.test".to_string(),
        phone: "+56 9 1234 5678".to_string(),
        tax_id: "22.222.222-2".to_string(),
    })
    .await;
    println!("[notice] {}", *receiver.borrow());

    let last_id = list.rows().last().map(|row| row.id());
    if let Some(id) = last_id {
        list.delete(&id).await;
        println!("[notice] {}", *receiver.borrow());
    }

    println!("---- after create + delete ----");
    front_desk::utils::print_row_table(list.rows(), list.pager().total());
}
